//! Header and cell parsing for wide-format series exports
//!
//! The export header carries the `REF_AREA` column, one column per date
//! label, and occasionally extra metadata columns that the dashboards
//! ignore. Date labels must parse exactly; metadata columns are skipped
//! with a debug log.

use crate::constants::{DATE_FORMAT, DATE_LABEL_PATTERN, columns};
use crate::{Error, Result};
use chrono::NaiveDate;
use csv::StringRecord;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Compiled date-label pattern, built once per process
fn date_label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DATE_LABEL_PATTERN).expect("valid date-label pattern"))
}

/// Whether a column label has the shape of a date label
pub fn is_date_label(label: &str) -> bool {
    date_label_regex().is_match(label)
}

/// One date-bearing column of the wide export
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateColumn {
    /// Column position in the CSV record
    pub index: usize,

    /// Parsed date label
    pub date: NaiveDate,
}

/// Resolved layout of a wide export header
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLayout {
    /// Position of the `REF_AREA` column
    pub ref_area_index: usize,

    /// Date columns in header order
    pub date_columns: Vec<DateColumn>,
}

impl HeaderLayout {
    /// The parsed dates, in header order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.date_columns.iter().map(|c| c.date).collect()
    }
}

/// Parse a wide export header into its layout
///
/// # Errors
/// * `Error::CsvParsing` if no `REF_AREA` column is present
/// * `Error::DateParsing` if a date-shaped label does not parse
/// * `Error::DataValidation` if no date columns are present at all
pub fn parse_header(headers: &StringRecord, source: &Path) -> Result<HeaderLayout> {
    let mut ref_area_index = None;
    let mut date_columns = Vec::new();

    for (index, label) in headers.iter().enumerate() {
        let label = label.trim();

        if label == columns::REF_AREA {
            ref_area_index = Some(index);
            continue;
        }

        if is_date_label(label) {
            let date = NaiveDate::parse_from_str(label, DATE_FORMAT).map_err(|e| {
                Error::date_parsing(
                    format!(
                        "Invalid date column label '{}' in {}",
                        label,
                        source.display()
                    ),
                    e,
                )
            })?;
            date_columns.push(DateColumn { index, date });
        } else {
            debug!(
                "Ignoring non-date column '{}' in {}",
                label,
                source.display()
            );
        }
    }

    let ref_area_index = ref_area_index.ok_or_else(|| {
        Error::csv_parsing(
            source.to_string_lossy().to_string(),
            format!("Missing required '{}' column", columns::REF_AREA),
            None,
        )
    })?;

    if date_columns.is_empty() {
        return Err(Error::data_validation(format!(
            "No date columns found in {}",
            source.display()
        )));
    }

    Ok(HeaderLayout {
        ref_area_index,
        date_columns,
    })
}

/// Parse one cell of the wide export
///
/// Empty cells are missing values; non-numeric cells are tolerated as
/// missing with a debug log. Only date labels are strict (see
/// [`parse_header`]).
pub fn parse_cell(value: Option<&str>) -> Option<f64> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.parse::<f64>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            debug!("Treating non-numeric cell '{}' as missing", trimmed);
            None
        }
    }
}
