//! Tests for header layout and cell parsing

use crate::app::services::series_loader::parser::{is_date_label, parse_cell, parse_header};
use crate::Error;
use csv::StringRecord;
use std::path::Path;

fn header(fields: &[&str]) -> StringRecord {
    StringRecord::from(fields.to_vec())
}

#[test]
fn test_date_label_detection() {
    assert!(is_date_label("1999-01-01"));
    assert!(is_date_label("2024-12-31"));
    assert!(!is_date_label("REF_AREA"));
    assert!(!is_date_label("1999-01"));
    assert!(!is_date_label("1999-01-01T00:00"));
}

#[test]
fn test_parse_header_layout() {
    let record = header(&["REF_AREA", "Series", "1999-01-01", "1999-02-01"]);
    let layout = parse_header(&record, Path::new("rates.csv")).unwrap();

    assert_eq!(layout.ref_area_index, 0);
    assert_eq!(layout.date_columns.len(), 2);
    assert_eq!(layout.date_columns[0].index, 2);
    assert_eq!(layout.dates()[1].to_string(), "1999-02-01");
}

#[test]
fn test_parse_header_missing_ref_area() {
    let record = header(&["Series", "1999-01-01"]);
    let result = parse_header(&record, Path::new("rates.csv"));

    assert!(matches!(result, Err(Error::CsvParsing { .. })));
}

#[test]
fn test_parse_header_no_date_columns() {
    let record = header(&["REF_AREA", "Series", "Frequency"]);
    let result = parse_header(&record, Path::new("rates.csv"));

    assert!(matches!(result, Err(Error::DataValidation { .. })));
}

#[test]
fn test_parse_header_rejects_malformed_date() {
    // Shaped like a date but not a real one: must propagate, not skip
    let record = header(&["REF_AREA", "1999-13-01"]);
    let result = parse_header(&record, Path::new("rates.csv"));

    assert!(matches!(result, Err(Error::DateParsing { .. })));
}

#[test]
fn test_parse_cell_values() {
    assert_eq!(parse_cell(Some("3.25")), Some(3.25));
    assert_eq!(parse_cell(Some(" 0.5 ")), Some(0.5));
    assert_eq!(parse_cell(Some("-0.75")), Some(-0.75));
    assert_eq!(parse_cell(Some("")), None);
    assert_eq!(parse_cell(Some("   ")), None);
    assert_eq!(parse_cell(Some("n/a")), None);
    assert_eq!(parse_cell(None), None);
}
