//! Ratesmap Library
//!
//! A Rust library for turning wide-format BIS economic time-series exports
//! (central bank policy rates, consumer price index) into the tidy, joined
//! table a choropleth dashboard renders.
//!
//! This library provides tools for:
//! - Parsing wide-format CSV exports with one `REF_AREA` row per country
//! - Loading and indexing ISO country-code and Eurozone reference tables
//! - Reshaping wide series into tidy (date, country, value) records with
//!   forward-fill or linear interpolation of gaps
//! - Expanding the "XM" Eurozone aggregate into per-member rows from each
//!   member's accession date
//! - Left-joining indicators on (date, ISO3) with display names and hover text
//! - Exporting the joined table as a polars DataFrame, CSV, or Parquet

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod country_registry;
        pub mod frame_export;
        pub mod joiner;
        pub mod pipeline;
        pub mod reshaper;
        pub mod selector;
        pub mod series_loader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FillStrategy, Indicator, JoinedRecord, TidyRecord, WideSeriesTable};
pub use app::services::pipeline::DashboardPipeline;
pub use config::PipelineConfig;

/// Result type alias for the ratesmap pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for dashboard pipeline operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// JSON parsing error (ISO conversion map)
    #[error("JSON parsing error in file '{file}': {message}")]
    JsonParsing {
        file: String,
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Date parsing error
    #[error("Date parsing error: {message}")]
    DateParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Cutoff date not present among a wide table's date columns
    #[error("Cutoff date {cutoff} not found among the date columns of '{file}'")]
    CutoffNotFound {
        cutoff: chrono::NaiveDate,
        file: String,
    },

    /// Country registry error
    #[error("Country registry error: {message}")]
    CountryRegistry { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// DataFrame construction or file export error
    #[error("Frame export error: {message}")]
    FrameExport {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a JSON parsing error with context
    pub fn json_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<serde_json::Error>,
    ) -> Self {
        Self::JsonParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a date parsing error
    pub fn date_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a cutoff lookup failure
    pub fn cutoff_not_found(cutoff: chrono::NaiveDate, file: impl Into<String>) -> Self {
        Self::CutoffNotFound {
            cutoff,
            file: file.into(),
        }
    }

    /// Create a country registry error
    pub fn country_registry(message: impl Into<String>) -> Self {
        Self::CountryRegistry {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a frame export error
    pub fn frame_export(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::FrameExport {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::JsonParsing {
            file: "unknown".to_string(),
            message: "JSON parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateParsing {
            message: "Date parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::FrameExport {
            message: "DataFrame operation failed".to_string(),
            source: error,
        }
    }
}
