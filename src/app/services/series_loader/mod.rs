//! Loader for wide-format BIS series exports
//!
//! This module reads the raw CSV exports of the statistics body: one row per
//! `REF_AREA` code, one column per date label, cells numeric or empty. The
//! loader tolerates ragged rows and non-numeric cells (logged, treated as
//! missing) but rejects structural problems such as a missing `REF_AREA`
//! column or unsorted date labels.

use crate::app::models::WideSeriesTable;
use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, warn};

pub mod parser;

#[cfg(test)]
pub mod tests;

pub use parser::{HeaderLayout, parse_cell, parse_header};

/// Load a wide-format series export from a CSV file
///
/// # Arguments
/// * `path` - Path to the wide CSV export
///
/// # Returns
/// * `Result<WideSeriesTable>` - The validated wide table
///
/// # Errors
/// * `Error::CsvParsing` if the file cannot be opened or the header lacks
///   a `REF_AREA` column
/// * `Error::DateParsing` for a column label that looks like a date but
///   fails to parse
/// * `Error::DataValidation` for unsorted date columns
pub async fn load_wide_csv(path: &Path) -> Result<WideSeriesTable> {
    debug!("Loading wide series export: {}", path.display());

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| {
            Error::csv_parsing(
                path.to_string_lossy().to_string(),
                "Failed to open CSV file".to_string(),
                Some(e),
            )
        })?;

    let headers = reader
        .headers()
        .map_err(|e| {
            Error::csv_parsing(
                path.to_string_lossy().to_string(),
                "Failed to read CSV header".to_string(),
                Some(e),
            )
        })?
        .clone();

    let layout = parse_header(&headers, path)?;

    let mut areas = Vec::new();
    let mut rows = Vec::new();
    let mut seen_areas: HashSet<String> = HashSet::new();
    let mut skipped_rows = 0usize;

    let mut record = StringRecord::new();
    while reader.read_record(&mut record).map_err(|e| {
        Error::csv_parsing(
            path.to_string_lossy().to_string(),
            "Failed to read CSV record".to_string(),
            Some(e),
        )
    })? {
        let area = match record.get(layout.ref_area_index).map(str::trim) {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => {
                warn!(
                    "Skipping row with empty reference area in {}",
                    path.display()
                );
                skipped_rows += 1;
                continue;
            }
        };

        if !seen_areas.insert(area.clone()) {
            // First row wins for a duplicated area
            warn!(
                "Duplicate reference area '{}' in {}, keeping first occurrence",
                area,
                path.display()
            );
            skipped_rows += 1;
            continue;
        }

        let values: Vec<Option<f64>> = layout
            .date_columns
            .iter()
            .map(|column| parse_cell(record.get(column.index)))
            .collect();

        areas.push(area);
        rows.push(values);
    }

    let dates = layout.dates();
    let table = WideSeriesTable::new(path.to_path_buf(), areas, dates, rows)?;

    info!(
        "Loaded {} areas x {} dates from {} ({} rows skipped)",
        table.area_count(),
        table.date_count(),
        path.display(),
        skipped_rows
    );

    Ok(table)
}
