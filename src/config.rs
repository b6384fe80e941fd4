//! Configuration management and validation.
//!
//! Provides the pipeline configuration: input file locations, the cutoff
//! date, and the missing-value policy, with builder-style overrides and
//! platform-default path resolution.

use crate::app::models::FillStrategy;
use crate::constants::{
    DATE_FORMAT, DEFAULT_COUNTRY_NAMES_FILENAME, DEFAULT_CPI_FILENAME, DEFAULT_CUTOFF_DATE,
    DEFAULT_DATA_DIR_NAME, DEFAULT_EUROZONE_FILENAME, DEFAULT_ISO_CONVERSIONS_FILENAME,
    DEFAULT_RATES_FILENAME,
};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Pipeline configuration: where the inputs live and how to reshape them
///
/// All paths are absolute once construction finishes; per-file overrides
/// replace the data-dir-relative defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory holding the input files
    pub data_dir: PathBuf,

    /// Wide-format policy-rate export
    pub rates_file: PathBuf,

    /// Wide-format CPI export
    pub cpi_file: PathBuf,

    /// Flat ISO2 -> ISO3 JSON map
    pub iso_conversions_file: PathBuf,

    /// ISO3 -> display-name CSV (Latin-1 tolerant)
    pub country_names_file: PathBuf,

    /// Eurozone membership CSV (ISO2, ISO3, Adoption)
    pub eurozone_file: PathBuf,

    /// First date column extracted from the wide tables
    pub cutoff: NaiveDate,

    /// Missing-value policy along the date axis
    pub fill: FillStrategy,
}

impl PipelineConfig {
    /// Create a configuration rooted at the given data directory
    ///
    /// Input files take their default names under `data_dir`; the cutoff
    /// defaults to the start of the euro-area series.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        let cutoff = NaiveDate::parse_from_str(DEFAULT_CUTOFF_DATE, DATE_FORMAT)
            .map_err(|e| Error::date_parsing("Invalid default cutoff date", e))?;

        Ok(Self {
            rates_file: data_dir.join(DEFAULT_RATES_FILENAME),
            cpi_file: data_dir.join(DEFAULT_CPI_FILENAME),
            iso_conversions_file: data_dir.join(DEFAULT_ISO_CONVERSIONS_FILENAME),
            country_names_file: data_dir.join(DEFAULT_COUNTRY_NAMES_FILENAME),
            eurozone_file: data_dir.join(DEFAULT_EUROZONE_FILENAME),
            data_dir,
            cutoff,
            fill: FillStrategy::default(),
        })
    }

    /// Create a configuration rooted at the platform data directory
    ///
    /// Resolves to `<platform data dir>/ratesmap`, e.g.
    /// `~/.local/share/ratesmap` on Linux.
    pub fn from_default_location() -> Result<Self> {
        let base = dirs::data_dir().ok_or_else(|| {
            Error::configuration("Could not determine the platform data directory".to_string())
        })?;

        let data_dir = base.join(DEFAULT_DATA_DIR_NAME);
        debug!("Using default data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Override the cutoff date
    pub fn with_cutoff(mut self, cutoff: NaiveDate) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Override the missing-value policy
    pub fn with_fill(mut self, fill: FillStrategy) -> Self {
        self.fill = fill;
        self
    }

    /// Override the policy-rate export path
    pub fn with_rates_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.rates_file = path.into();
        self
    }

    /// Override the CPI export path
    pub fn with_cpi_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cpi_file = path.into();
        self
    }

    /// Override the ISO conversion map path
    pub fn with_iso_conversions_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.iso_conversions_file = path.into();
        self
    }

    /// Override the country-name table path
    pub fn with_country_names_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.country_names_file = path.into();
        self
    }

    /// Override the Eurozone membership table path
    pub fn with_eurozone_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.eurozone_file = path.into();
        self
    }

    /// Validate that every configured input file exists
    pub fn validate(&self) -> Result<()> {
        for (label, path) in self.input_files() {
            if !path.exists() {
                return Err(Error::configuration(format!(
                    "{} not found: {}",
                    label,
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// The configured input files with human-readable labels
    pub fn input_files(&self) -> [(&'static str, &Path); 5] {
        [
            ("Policy-rate export", self.rates_file.as_path()),
            ("CPI export", self.cpi_file.as_path()),
            ("ISO conversion map", self.iso_conversions_file.as_path()),
            ("Country-name table", self.country_names_file.as_path()),
            ("Eurozone membership table", self.eurozone_file.as_path()),
        ]
    }
}
