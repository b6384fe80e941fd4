//! Data models for the dashboard pipeline
//!
//! This module contains the core data structures for representing wide-format
//! BIS series exports, tidy observations, and the joined table consumed by
//! the presentation layer.

use crate::constants::{DATE_FORMAT, columns};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// Indicators
// =============================================================================

/// Economic indicator carried through the pipeline
///
/// Each indicator knows its display label (used for hover text and exported
/// column names) and the columns it occupies in the joined table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    /// Central bank policy interest rate
    PolicyRate,
    /// Consumer price index (year-on-year change)
    Cpi,
}

impl Indicator {
    /// Display label, matching the column naming of the source dashboards
    pub fn label(&self) -> &'static str {
        match self {
            Indicator::PolicyRate => columns::INTEREST_RATE,
            Indicator::Cpi => columns::CPI,
        }
    }

    /// Column name of this indicator's value in the joined table
    pub fn value_column(&self) -> &'static str {
        self.label()
    }

    /// Column name of this indicator's hover text in the joined table
    pub fn text_column(&self) -> &'static str {
        match self {
            Indicator::PolicyRate => columns::INTEREST_RATE_TEXT,
            Indicator::Cpi => columns::CPI_TEXT,
        }
    }

    /// Resolve an indicator from its display label
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            columns::INTEREST_RATE => Some(Indicator::PolicyRate),
            columns::CPI => Some(Indicator::Cpi),
            _ => None,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Missing-Value Policy
// =============================================================================

/// Missing-value policy applied along the date axis per country
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillStrategy {
    /// A missing value takes the most recent prior non-missing value
    #[default]
    ForwardFill,
    /// Interior gaps are interpolated linearly between known neighbours
    Interpolate,
}

impl fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillStrategy::ForwardFill => f.write_str("forward-fill"),
            FillStrategy::Interpolate => f.write_str("interpolate"),
        }
    }
}

// =============================================================================
// Wide Series Table
// =============================================================================

/// Wide-format series table as exported by the statistics body
///
/// One row per reference area, one column per date. Cells are numeric or
/// missing. Construction validates the shape invariants; the table is
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct WideSeriesTable {
    /// Source file, kept for error context
    pub source: PathBuf,

    /// Reference-area codes, one per row, in file order
    pub areas: Vec<String>,

    /// Parsed date-column labels, strictly ascending
    pub dates: Vec<NaiveDate>,

    /// Cell values, row-major: `rows[area][date]`
    pub rows: Vec<Vec<Option<f64>>>,

    /// Row index by area code for O(1) series lookups
    area_index: HashMap<String, usize>,
}

impl WideSeriesTable {
    /// Create a new table with shape validation
    pub fn new(
        source: PathBuf,
        areas: Vec<String>,
        dates: Vec<NaiveDate>,
        rows: Vec<Vec<Option<f64>>>,
    ) -> Result<Self> {
        if areas.len() != rows.len() {
            return Err(Error::data_validation(format!(
                "Area count {} does not match row count {} in '{}'",
                areas.len(),
                rows.len(),
                source.display()
            )));
        }

        for (area, row) in areas.iter().zip(rows.iter()) {
            if row.len() != dates.len() {
                return Err(Error::data_validation(format!(
                    "Row for area '{}' has {} cells, expected {} in '{}'",
                    area,
                    row.len(),
                    dates.len(),
                    source.display()
                )));
            }
        }

        // Date labels must be monotonic ascending
        for pair in dates.windows(2) {
            if pair[0] >= pair[1] {
                return Err(Error::data_validation(format!(
                    "Date columns not strictly ascending in '{}': {} >= {}",
                    source.display(),
                    pair[0],
                    pair[1]
                )));
            }
        }

        let mut area_index = HashMap::with_capacity(areas.len());
        for (idx, area) in areas.iter().enumerate() {
            if area_index.insert(area.clone(), idx).is_some() {
                return Err(Error::data_validation(format!(
                    "Duplicate reference area '{}' in '{}'",
                    area,
                    source.display()
                )));
            }
        }

        Ok(Self {
            source,
            areas,
            dates,
            rows,
            area_index,
        })
    }

    /// Number of reference areas (rows)
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// Number of date columns
    pub fn date_count(&self) -> usize {
        self.dates.len()
    }

    /// Position of a date among the date columns, if present
    pub fn date_index(&self, date: NaiveDate) -> Option<usize> {
        // Dates are sorted, so a binary search suffices
        self.dates.binary_search(&date).ok()
    }

    /// Full series for a reference area (O(1) lookup)
    pub fn series(&self, area: &str) -> Option<&[Option<f64>]> {
        self.area_index
            .get(area)
            .map(|&idx| self.rows[idx].as_slice())
    }

    /// Whether a reference area is present
    pub fn contains_area(&self, area: &str) -> bool {
        self.area_index.contains_key(area)
    }
}

// =============================================================================
// Tidy and Joined Records
// =============================================================================

/// One tidy observation: the canonical unit flowing through the reshaper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TidyRecord {
    /// Observation date
    pub date: NaiveDate,

    /// Country code as carried by the source (ISO2, ISO3, or aggregate)
    pub code: String,

    /// Indicator this observation belongs to
    pub indicator: Indicator,

    /// Observed value, missing where the source (and fill) left a gap
    pub value: Option<f64>,
}

/// One row of the joined table consumed by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedRecord {
    /// Observation date
    pub date: NaiveDate,

    /// ISO 3166-1 alpha-3 country code
    pub iso3: String,

    /// Country display name from the reference map
    pub name: String,

    /// Policy interest rate, missing where unmatched or gapped
    pub interest_rate: Option<f64>,

    /// Consumer price index, missing where the left join found no CPI row
    pub cpi: Option<f64>,

    /// Hover text for the interest-rate indicator
    pub interest_rate_text: Option<String>,

    /// Hover text for the CPI indicator
    pub cpi_text: Option<String>,
}

impl JoinedRecord {
    /// Value of the given indicator
    pub fn value(&self, indicator: Indicator) -> Option<f64> {
        match indicator {
            Indicator::PolicyRate => self.interest_rate,
            Indicator::Cpi => self.cpi,
        }
    }

    /// Hover text of the given indicator
    pub fn hover_text(&self, indicator: Indicator) -> Option<&str> {
        match indicator {
            Indicator::PolicyRate => self.interest_rate_text.as_deref(),
            Indicator::Cpi => self.cpi_text.as_deref(),
        }
    }

    /// Formatted date, as exported to the presentation layer
    pub fn date_label(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

// =============================================================================
// Reference Entities
// =============================================================================

/// Country display-name entry from the ISO3 -> name reference table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-3 code
    pub iso3: String,

    /// Display name (may carry accented characters from the Latin-1 source)
    pub name: String,
}

impl Country {
    /// Create a new country entry with validation
    pub fn new(iso3: String, name: String) -> Result<Self> {
        let country = Self { iso3, name };
        country.validate()?;
        Ok(country)
    }

    /// Validate code shape and name presence
    pub fn validate(&self) -> Result<()> {
        if self.iso3.len() != crate::constants::ISO3_CODE_LEN {
            return Err(Error::data_validation(format!(
                "Invalid ISO3 code '{}': expected {} characters",
                self.iso3,
                crate::constants::ISO3_CODE_LEN
            )));
        }

        if self.name.trim().is_empty() {
            return Err(Error::data_validation(format!(
                "Country name for '{}' cannot be empty",
                self.iso3
            )));
        }

        Ok(())
    }
}

/// Eurozone membership entry: who adopted the euro, and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EurozoneMember {
    /// ISO 3166-1 alpha-2 code, as used by the BIS exports
    pub iso2: String,

    /// ISO 3166-1 alpha-3 code
    pub iso3: String,

    /// Euro adoption date; the aggregate substitutes for the member only
    /// at/after this date
    pub adoption: NaiveDate,
}

impl EurozoneMember {
    /// Create a new membership entry with validation
    pub fn new(iso2: String, iso3: String, adoption: NaiveDate) -> Result<Self> {
        let member = Self {
            iso2,
            iso3,
            adoption,
        };
        member.validate()?;
        Ok(member)
    }

    /// Validate code shapes
    pub fn validate(&self) -> Result<()> {
        if self.iso2.len() != crate::constants::ISO2_CODE_LEN {
            return Err(Error::data_validation(format!(
                "Invalid ISO2 code '{}' in Eurozone membership",
                self.iso2
            )));
        }

        if self.iso3.len() != crate::constants::ISO3_CODE_LEN {
            return Err(Error::data_validation(format!(
                "Invalid ISO3 code '{}' in Eurozone membership",
                self.iso3
            )));
        }

        Ok(())
    }

    /// Whether the member had adopted the euro at the given date
    pub fn adopted_by(&self, date: NaiveDate) -> bool {
        self.adoption <= date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn sample_table() -> WideSeriesTable {
        WideSeriesTable::new(
            PathBuf::from("rates.csv"),
            vec!["DE".to_string(), "XM".to_string()],
            vec![date("1999-01-01"), date("1999-02-01")],
            vec![vec![Some(3.0), None], vec![Some(2.5), Some(2.75)]],
        )
        .unwrap()
    }

    #[test]
    fn test_wide_table_lookups() {
        let table = sample_table();
        assert_eq!(table.area_count(), 2);
        assert_eq!(table.date_count(), 2);
        assert_eq!(table.date_index(date("1999-02-01")), Some(1));
        assert_eq!(table.date_index(date("2000-01-01")), None);
        assert_eq!(table.series("XM"), Some(&[Some(2.5), Some(2.75)][..]));
        assert!(table.contains_area("DE"));
        assert!(!table.contains_area("FR"));
    }

    #[test]
    fn test_wide_table_rejects_ragged_rows() {
        let result = WideSeriesTable::new(
            PathBuf::from("rates.csv"),
            vec!["DE".to_string()],
            vec![date("1999-01-01"), date("1999-02-01")],
            vec![vec![Some(3.0)]],
        );
        assert!(matches!(result, Err(Error::DataValidation { .. })));
    }

    #[test]
    fn test_wide_table_rejects_unsorted_dates() {
        let result = WideSeriesTable::new(
            PathBuf::from("rates.csv"),
            vec!["DE".to_string()],
            vec![date("1999-02-01"), date("1999-01-01")],
            vec![vec![Some(3.0), Some(3.0)]],
        );
        assert!(matches!(result, Err(Error::DataValidation { .. })));
    }

    #[test]
    fn test_wide_table_rejects_duplicate_areas() {
        let result = WideSeriesTable::new(
            PathBuf::from("rates.csv"),
            vec!["DE".to_string(), "DE".to_string()],
            vec![date("1999-01-01")],
            vec![vec![Some(3.0)], vec![Some(4.0)]],
        );
        assert!(matches!(result, Err(Error::DataValidation { .. })));
    }

    #[test]
    fn test_indicator_labels_round_trip() {
        for indicator in [Indicator::PolicyRate, Indicator::Cpi] {
            assert_eq!(Indicator::from_label(indicator.label()), Some(indicator));
        }
        assert_eq!(Indicator::from_label("unemployment"), None);
    }

    #[test]
    fn test_eurozone_member_adoption_boundary() {
        let member = EurozoneMember::new(
            "LT".to_string(),
            "LTU".to_string(),
            date("2015-01-01"),
        )
        .unwrap();

        assert!(!member.adopted_by(date("2014-12-01")));
        assert!(member.adopted_by(date("2015-01-01")));
        assert!(member.adopted_by(date("2020-06-01")));
    }

    #[test]
    fn test_country_validation() {
        assert!(Country::new("DEU".to_string(), "Germany".to_string()).is_ok());
        assert!(Country::new("DE".to_string(), "Germany".to_string()).is_err());
        assert!(Country::new("DEU".to_string(), "  ".to_string()).is_err());
    }
}
