//! Command-line argument definitions for the ratesmap pipeline
//!
//! This module defines the complete CLI interface using the clap derive
//! API: the `process` command running the full reshape-join pipeline and
//! the `countries` command reporting on the reference registry.

use crate::app::models::FillStrategy;
use crate::config::PipelineConfig;
use crate::constants::{DATE_FORMAT, DEFAULT_CUTOFF_DATE, ISO3_CODE_LEN};
use crate::{Error, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the ratesmap dashboard pipeline
///
/// Tidies wide-format BIS policy-rate and CPI exports into the joined
/// table a choropleth dashboard renders.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ratesmap",
    version,
    about = "Tidy BIS policy-rate and CPI exports into a joined dashboard table",
    long_about = "Loads wide-format BIS exports of central bank policy rates and consumer \
                  price indices, reshapes them into tidy records with forward-fill or \
                  interpolation, expands the Eurozone aggregate into member countries, and \
                  left-joins both indicators with ISO country names and hover text for \
                  choropleth rendering."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the ratesmap pipeline
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the reshape-join pipeline and export the joined table
    Process(ProcessArgs),
    /// Report on the country reference registry
    Countries(CountriesArgs),
}

/// Arguments for the process command (main pipeline)
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Directory holding the input files
    ///
    /// Expects the wide policy-rate and CPI exports plus the three
    /// reference tables under their default names. If not specified,
    /// defaults to the platform data directory (e.g. ~/.local/share/ratesmap).
    #[arg(
        short = 'i',
        long = "data-dir",
        value_name = "PATH",
        help = "Directory holding the input files"
    )]
    pub data_dir: Option<PathBuf>,

    /// Override the policy-rate export path
    #[arg(long = "rates-file", value_name = "FILE")]
    pub rates_file: Option<PathBuf>,

    /// Override the CPI export path
    #[arg(long = "cpi-file", value_name = "FILE")]
    pub cpi_file: Option<PathBuf>,

    /// Override the ISO2 -> ISO3 JSON map path
    #[arg(long = "iso-conversions-file", value_name = "FILE")]
    pub iso_conversions_file: Option<PathBuf>,

    /// Override the ISO3 -> name table path
    #[arg(long = "country-names-file", value_name = "FILE")]
    pub country_names_file: Option<PathBuf>,

    /// Override the Eurozone membership table path
    #[arg(long = "eurozone-file", value_name = "FILE")]
    pub eurozone_file: Option<PathBuf>,

    /// First date column to extract from the wide exports
    ///
    /// Must match one of the exports' date columns exactly; a date between
    /// columns is a lookup failure, not snapped to a neighbour.
    #[arg(
        long = "cutoff",
        value_name = "DATE",
        default_value = DEFAULT_CUTOFF_DATE,
        help = "First date column to extract (YYYY-MM-DD)"
    )]
    pub cutoff: String,

    /// Missing-value policy along the date axis
    #[arg(
        long = "fill",
        value_enum,
        default_value_t = FillMode::ForwardFill,
        help = "Missing-value policy along the date axis"
    )]
    pub fill: FillMode,

    /// Filter the joined table to one calendar year (requires --month and --countries)
    #[arg(long = "year", value_name = "YEAR")]
    pub year: Option<i32>,

    /// Filter the joined table to one calendar month (requires --year and --countries)
    #[arg(long = "month", value_name = "MONTH")]
    pub month: Option<u32>,

    /// Filter the joined table to these ISO3 codes (comma-separated)
    #[arg(
        long = "countries",
        value_name = "LIST",
        help = "Comma-separated ISO3 codes to keep (e.g. DEU,FRA)"
    )]
    pub countries: Option<CountryList>,

    /// Output file for the joined table
    ///
    /// If not specified, the table is computed and summarized but not
    /// written anywhere.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Output file for the joined table"
    )]
    pub output: Option<PathBuf>,

    /// Output file format
    #[arg(
        long = "format",
        value_enum,
        default_value_t = ExportFormat::Csv,
        help = "Output file format"
    )]
    pub format: ExportFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the countries command (registry reports)
#[derive(Debug, Clone, Parser)]
pub struct CountriesArgs {
    /// Directory holding the reference tables
    #[arg(
        short = 'i',
        long = "data-dir",
        value_name = "PATH",
        help = "Directory holding the reference tables"
    )]
    pub data_dir: Option<PathBuf>,

    /// Output format for the registry report
    #[arg(
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Human,
        help = "Output format for the registry report"
    )]
    pub output_format: OutputFormat,

    /// Output file for the registry report
    ///
    /// If not specified, outputs to stdout
    #[arg(
        short = 'o',
        long = "output-file",
        value_name = "FILE",
        help = "Output file for the registry report"
    )]
    pub output_file: Option<PathBuf>,

    /// Include the full country listing, not just summary counts
    #[arg(long = "detailed", help = "Include the full country listing")]
    pub detailed: bool,

    /// Restrict the report to Eurozone members with adoption dates
    #[arg(long = "eurozone", help = "Report Eurozone members only")]
    pub eurozone: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Missing-value policy options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FillMode {
    /// Carry the most recent prior observation into gaps
    ForwardFill,
    /// Interpolate interior gaps linearly
    Interpolate,
}

impl FillMode {
    /// Convert to the pipeline's fill strategy
    pub fn to_strategy(self) -> FillStrategy {
        match self {
            FillMode::ForwardFill => FillStrategy::ForwardFill,
            FillMode::Interpolate => FillStrategy::Interpolate,
        }
    }
}

/// Output formats for the joined table
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values
    Csv,
    /// Snappy-compressed Parquet
    Parquet,
}

/// Output format options for the registry report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

/// Wrapper for parsing comma-separated ISO3 country lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryList {
    pub codes: Vec<String>,
}

impl FromStr for CountryList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let codes: Vec<String> = s
            .split(',')
            .map(|code| code.trim().to_uppercase())
            .filter(|code| !code.is_empty())
            .collect();

        if codes.is_empty() {
            return Err(Error::data_validation(
                "Country list cannot be empty".to_string(),
            ));
        }

        for code in &codes {
            if code.len() != ISO3_CODE_LEN || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(Error::data_validation(format!(
                    "Invalid ISO3 code '{}' in country list",
                    code
                )));
            }
        }

        Ok(CountryList { codes })
    }
}

impl CountryList {
    /// The codes as a selection set
    pub fn to_selection(&self) -> HashSet<String> {
        self.codes.iter().cloned().collect()
    }
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<Commands> {
        self.command.clone()
    }
}

impl ProcessArgs {
    /// Validate the process command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        // Validate data dir exists (only if explicitly provided)
        if let Some(data_dir) = &self.data_dir {
            if !data_dir.exists() {
                return Err(Error::configuration(format!(
                    "Data directory does not exist: {}",
                    data_dir.display()
                )));
            }

            if !data_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Data directory is not a directory: {}",
                    data_dir.display()
                )));
            }
        }

        // The cutoff must be a real date
        self.get_cutoff()?;

        // The filter needs all three of year, month, countries
        let filter_parts = [
            self.year.is_some(),
            self.month.is_some(),
            self.countries.is_some(),
        ];
        if filter_parts.iter().any(|&p| p) && !filter_parts.iter().all(|&p| p) {
            return Err(Error::configuration(
                "Filtering requires --year, --month, and --countries together".to_string(),
            ));
        }

        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(Error::configuration(format!(
                    "Month must be between 1 and 12, got {}",
                    month
                )));
            }
        }

        // An output format without an output file does nothing
        if self.output.is_none() && self.format == ExportFormat::Parquet {
            return Err(Error::configuration(
                "--format parquet requires --output".to_string(),
            ));
        }

        Ok(())
    }

    /// Parse the cutoff argument
    pub fn get_cutoff(&self) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(&self.cutoff, DATE_FORMAT).map_err(|e| {
            Error::date_parsing(format!("Invalid cutoff date '{}'", self.cutoff), e)
        })
    }

    /// Build the pipeline configuration these arguments describe
    pub fn to_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.data_dir {
            Some(dir) => PipelineConfig::new(dir.clone())?,
            None => PipelineConfig::from_default_location()?,
        };

        config = config
            .with_cutoff(self.get_cutoff()?)
            .with_fill(self.fill.to_strategy());

        if let Some(path) = &self.rates_file {
            config = config.with_rates_file(path.clone());
        }
        if let Some(path) = &self.cpi_file {
            config = config.with_cpi_file(path.clone());
        }
        if let Some(path) = &self.iso_conversions_file {
            config = config.with_iso_conversions_file(path.clone());
        }
        if let Some(path) = &self.country_names_file {
            config = config.with_country_names_file(path.clone());
        }
        if let Some(path) = &self.eurozone_file {
            config = config.with_eurozone_file(path.clone());
        }

        Ok(config)
    }

    /// The (year, month, countries) selection, when all three are present
    pub fn filter_selection(&self) -> Option<(i32, u32, HashSet<String>)> {
        match (self.year, self.month, &self.countries) {
            (Some(year), Some(month), Some(list)) => {
                Some((year, month, list.to_selection()))
            }
            _ => None,
        }
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl CountriesArgs {
    /// Validate the countries command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(data_dir) = &self.data_dir {
            if !data_dir.exists() {
                return Err(Error::configuration(format!(
                    "Data directory does not exist: {}",
                    data_dir.display()
                )));
            }
        }

        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output file directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

impl Default for ProcessArgs {
    fn default() -> Self {
        Self {
            data_dir: None,
            rates_file: None,
            cpi_file: None,
            iso_conversions_file: None,
            country_names_file: None,
            eurozone_file: None,
            cutoff: DEFAULT_CUTOFF_DATE.to_string(),
            fill: FillMode::ForwardFill,
            year: None,
            month: None,
            countries: None,
            output: None,
            format: ExportFormat::Csv,
            verbose: 0,
            quiet: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_country_list_parsing() {
        let result = CountryList::from_str("DEU").unwrap();
        assert_eq!(result.codes, vec!["DEU"]);

        let result = CountryList::from_str("deu, fra ,USA").unwrap();
        assert_eq!(result.codes, vec!["DEU", "FRA", "USA"]);

        assert!(CountryList::from_str("").is_err());
        assert!(CountryList::from_str(",,,").is_err());
        assert!(CountryList::from_str("DE").is_err());
        assert!(CountryList::from_str("D3U").is_err());
    }

    #[test]
    fn test_process_args_validation() {
        let temp_dir = TempDir::new().unwrap();

        let args = ProcessArgs {
            data_dir: Some(temp_dir.path().to_path_buf()),
            ..ProcessArgs::default()
        };
        assert!(args.validate().is_ok());

        // Nonexistent data dir
        let mut invalid = args.clone();
        invalid.data_dir = Some(PathBuf::from("/nonexistent/path"));
        assert!(invalid.validate().is_err());

        // Malformed cutoff
        let mut invalid = args.clone();
        invalid.cutoff = "not-a-date".to_string();
        assert!(invalid.validate().is_err());

        // Partial filter
        let mut invalid = args.clone();
        invalid.year = Some(2020);
        assert!(invalid.validate().is_err());

        // Complete filter
        let mut valid = args.clone();
        valid.year = Some(2020);
        valid.month = Some(6);
        valid.countries = Some(CountryList::from_str("DEU,FRA").unwrap());
        assert!(valid.validate().is_ok());

        // Month out of range
        let mut invalid = valid.clone();
        invalid.month = Some(13);
        assert!(invalid.validate().is_err());

        // Parquet needs an output path
        let mut invalid = args.clone();
        invalid.format = ExportFormat::Parquet;
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_to_config_applies_overrides() {
        let temp_dir = TempDir::new().unwrap();

        let args = ProcessArgs {
            data_dir: Some(temp_dir.path().to_path_buf()),
            rates_file: Some(PathBuf::from("/elsewhere/rates.csv")),
            cutoff: "2008-09-01".to_string(),
            fill: FillMode::Interpolate,
            ..ProcessArgs::default()
        };

        let config = args.to_config().unwrap();
        assert_eq!(config.rates_file, PathBuf::from("/elsewhere/rates.csv"));
        assert_eq!(config.cutoff.to_string(), "2008-09-01");
        assert_eq!(config.fill, FillStrategy::Interpolate);
        assert_eq!(config.data_dir, temp_dir.path());
    }

    #[test]
    fn test_filter_selection() {
        let args = ProcessArgs {
            year: Some(2020),
            month: Some(6),
            countries: Some(CountryList::from_str("DEU,FRA").unwrap()),
            ..ProcessArgs::default()
        };

        let (year, month, countries) = args.filter_selection().unwrap();
        assert_eq!(year, 2020);
        assert_eq!(month, 6);
        assert!(countries.contains("DEU"));
        assert!(countries.contains("FRA"));

        assert!(ProcessArgs::default().filter_selection().is_none());
    }

    #[test]
    fn test_log_level() {
        let mut args = ProcessArgs::default();

        assert_eq!(args.get_log_level(), "warn");

        args.verbose = 1;
        assert_eq!(args.get_log_level(), "info");

        args.verbose = 3;
        assert_eq!(args.get_log_level(), "trace");

        args.verbose = 0;
        args.quiet = true;
        assert_eq!(args.get_log_level(), "error");
        assert!(!args.show_progress());
    }
}
