//! Tests for cutoff resolution and the wide-to-long transposition

use super::{date, monthly_dates, wide_table};
use crate::Error;
use crate::app::models::Indicator;
use crate::app::services::reshaper::melt::{SeriesColumns, cutoff_window};

#[test]
fn test_cutoff_window_slices_from_match() {
    let table = wide_table(
        monthly_dates("1999-01-01", 4),
        vec![("DE", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)])],
    );

    let window = cutoff_window(&table, date("1999-03-01")).unwrap();
    assert_eq!(window.start, 2);
    assert_eq!(window.dates, &table.dates[2..]);
}

#[test]
fn test_cutoff_missing_is_lookup_failure() {
    let table = wide_table(
        monthly_dates("1999-01-01", 4),
        vec![("DE", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)])],
    );

    // 1999-03-15 lies between two columns: never silently snapped
    let result = cutoff_window(&table, date("1999-03-15"));
    assert!(matches!(result, Err(Error::CutoffNotFound { .. })));
}

#[test]
fn test_series_columns_preserve_order_and_window() {
    let table = wide_table(
        monthly_dates("1999-01-01", 3),
        vec![
            ("XM", vec![Some(2.5), Some(2.75), Some(3.0)]),
            ("DE", vec![Some(1.0), None, Some(3.0)]),
        ],
    );

    let columns = SeriesColumns::from_window(&table, 1);
    assert_eq!(columns.len(), 2);
    assert_eq!(columns.get("XM"), Some(&[Some(2.75), Some(3.0)][..]));
    assert_eq!(columns.get("DE"), Some(&[None, Some(3.0)][..]));
}

#[test]
fn test_get_or_insert_appends_missing_series() {
    let table = wide_table(monthly_dates("1999-01-01", 2), vec![("XM", vec![Some(1.0), Some(2.0)])]);
    let mut columns = SeriesColumns::from_window(&table, 0);

    assert!(!columns.contains("LT"));
    columns.get_or_insert("LT", 2)[1] = Some(9.0);
    assert_eq!(columns.get("LT"), Some(&[None, Some(9.0)][..]));

    // Existing series are returned, not replaced
    columns.get_or_insert("XM", 2);
    assert_eq!(columns.get("XM"), Some(&[Some(1.0), Some(2.0)][..]));
}

#[test]
fn test_emit_tidy_unique_keys() {
    let dates = monthly_dates("2020-01-01", 2);
    let table = wide_table(
        dates.clone(),
        vec![
            ("DE", vec![Some(0.0), Some(0.0)]),
            ("US", vec![Some(1.5), None]),
        ],
    );

    let columns = SeriesColumns::from_window(&table, 0);
    let records = columns.emit_tidy(&dates, Indicator::PolicyRate);

    assert_eq!(records.len(), 4);

    let mut keys: Vec<(chrono::NaiveDate, String)> = records
        .iter()
        .map(|r| (r.date, r.code.clone()))
        .collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 4, "(date, code) must be unique");

    // Gaps survive as missing values, not dropped rows
    assert!(
        records
            .iter()
            .any(|r| r.code == "US" && r.date == dates[1] && r.value.is_none())
    );
}

#[test]
fn test_wide_long_wide_round_trip() {
    // A complete table reshapes to tidy and back without loss
    let dates = monthly_dates("1999-01-01", 3);
    let table = wide_table(
        dates.clone(),
        vec![
            ("DE", vec![Some(3.0), Some(3.25), Some(3.5)]),
            ("US", vec![Some(4.75), Some(4.75), Some(5.0)]),
            ("JP", vec![Some(0.5), Some(0.25), Some(0.25)]),
        ],
    );

    let columns = SeriesColumns::from_window(&table, 0);
    let records = columns.emit_tidy(&dates, Indicator::PolicyRate);

    // Pivot the tidy records back into wide rows
    for (area_idx, area) in table.areas.iter().enumerate() {
        for (date_idx, date) in table.dates.iter().enumerate() {
            let tidy_value = records
                .iter()
                .find(|r| &r.code == area && r.date == *date)
                .and_then(|r| r.value);
            assert_eq!(tidy_value, table.rows[area_idx][date_idx]);
        }
    }
}
