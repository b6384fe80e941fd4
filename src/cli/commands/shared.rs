//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! both CLI command implementations.

use crate::Result;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::debug;

/// Processing summary reported across all commands
#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    /// Rows in the joined table
    pub rows_joined: usize,

    /// Distinct countries in the joined table
    pub countries: usize,

    /// Date range covered by the joined table
    pub date_range: Option<(NaiveDate, NaiveDate)>,

    /// Rows remaining after the optional (year, month, countries) filter
    pub rows_filtered: Option<usize>,

    /// Output file written, with its size in bytes
    pub output: Option<(PathBuf, u64)>,

    /// Total processing time
    pub processing_time: std::time::Duration,
}

impl ProcessingSummary {
    /// Format a size in human-readable units
    pub fn format_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// Set up structured logging for a command
///
/// The filter honours `RUST_LOG` when set; otherwise the level derived
/// from the verbosity flags applies to this crate only.
pub fn setup_logging(log_level: &str, quiet: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ratesmap={}", log_level)));

    let result = if quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if result.is_err() {
        // A subscriber is already installed (e.g. in tests); keep it
        debug!("Logging already initialized, keeping existing subscriber");
    }

    Ok(())
}
