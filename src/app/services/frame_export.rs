//! DataFrame export of the joined table
//!
//! The presentation layer consumes a columnar frame, so the typed joined
//! records are converted into a polars `DataFrame` here, at the boundary.
//! The same frame backs the optional CSV and Parquet exports of the
//! `process` command.

use crate::app::models::JoinedRecord;
use crate::constants::{DATE_FORMAT, columns};
use crate::{Error, Result};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Convert joined records into a columnar DataFrame
///
/// Dates are exported as `YYYY-MM-DD` strings, the format the charting
/// layer's animation slider keys frames by. Missing values become nulls.
pub fn joined_to_dataframe(records: &[JoinedRecord]) -> Result<DataFrame> {
    debug!("Converting {} joined rows to a DataFrame", records.len());

    let dates: Vec<String> = records
        .iter()
        .map(|r| r.date.format(DATE_FORMAT).to_string())
        .collect();
    let iso3: Vec<&str> = records.iter().map(|r| r.iso3.as_str()).collect();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    let rates: Vec<Option<f64>> = records.iter().map(|r| r.interest_rate).collect();
    let cpi: Vec<Option<f64>> = records.iter().map(|r| r.cpi).collect();
    let rate_text: Vec<Option<&str>> = records
        .iter()
        .map(|r| r.interest_rate_text.as_deref())
        .collect();
    let cpi_text: Vec<Option<&str>> = records.iter().map(|r| r.cpi_text.as_deref()).collect();

    let frame_columns = vec![
        Column::new(columns::DATE.into(), dates),
        Column::new(columns::ISO3.into(), iso3),
        Column::new(columns::NAME.into(), names),
        Column::new(columns::INTEREST_RATE.into(), rates),
        Column::new(columns::CPI.into(), cpi),
        Column::new(columns::INTEREST_RATE_TEXT.into(), rate_text),
        Column::new(columns::CPI_TEXT.into(), cpi_text),
    ];

    DataFrame::new(frame_columns)
        .map_err(|e| Error::frame_export("Failed to assemble joined DataFrame", e))
}

/// Write the joined table as CSV and return the bytes written
pub fn write_csv(records: &[JoinedRecord], path: &Path) -> Result<u64> {
    let mut df = joined_to_dataframe(records)?;

    let mut file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .map_err(|e| Error::frame_export(format!("Failed to write {}", path.display()), e))?;

    let size = file
        .metadata()
        .map_err(|e| Error::io(format!("Failed to stat {}", path.display()), e))?
        .len();

    debug!("Wrote {} rows of CSV to {}", df.height(), path.display());
    Ok(size)
}

/// Write the joined table as Snappy-compressed Parquet and return the
/// bytes written
pub fn write_parquet(records: &[JoinedRecord], path: &Path) -> Result<u64> {
    let mut df = joined_to_dataframe(records)?;

    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

    let size = ParquetWriter::new(file)
        .with_compression(ParquetCompression::Snappy)
        .finish(&mut df)
        .map_err(|e| Error::frame_export(format!("Failed to write {}", path.display()), e))?;

    debug!(
        "Wrote {} rows of Parquet to {}",
        df.height(),
        path.display()
    );
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_records() -> Vec<JoinedRecord> {
        vec![
            JoinedRecord {
                date: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
                iso3: "DEU".to_string(),
                name: "Germany".to_string(),
                interest_rate: Some(0.0),
                cpi: Some(1.7),
                interest_rate_text: Some("Germany<br>0.00%".to_string()),
                cpi_text: Some("Germany<br>1.70%".to_string()),
            },
            JoinedRecord {
                date: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
                iso3: "USA".to_string(),
                name: "United States".to_string(),
                interest_rate: Some(0.25),
                cpi: None,
                interest_rate_text: Some("United States<br>0.25%".to_string()),
                cpi_text: None,
            },
        ]
    }

    #[test]
    fn test_dataframe_shape_and_columns() {
        let df = joined_to_dataframe(&sample_records()).unwrap();

        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                columns::DATE,
                columns::ISO3,
                columns::NAME,
                columns::INTEREST_RATE,
                columns::CPI,
                columns::INTEREST_RATE_TEXT,
                columns::CPI_TEXT,
            ]
        );

        // Missing CPI surfaces as a null, not a zero
        assert_eq!(df.column(columns::CPI).unwrap().null_count(), 1);
    }

    #[test]
    fn test_empty_table_exports() {
        let df = joined_to_dataframe(&[]).unwrap();
        assert_eq!(df.height(), 0);
    }

    #[test]
    fn test_write_csv_round_trips_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("joined.csv");

        let size = write_csv(&sample_records(), &path).unwrap();
        assert!(size > 0);

        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert!(header.contains(columns::ISO3));
        assert!(header.contains(columns::INTEREST_RATE));
        assert!(content.contains("Germany<br>0.00%"));
    }

    #[test]
    fn test_write_parquet_produces_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("joined.parquet");

        let size = write_parquet(&sample_records(), &path).unwrap();
        assert!(size > 0);
        assert!(path.exists());
    }
}
