//! Registry metadata and loading statistics

use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Metadata about a loaded country registry
#[derive(Debug, Clone)]
pub struct RegistryMetadata {
    /// Directory the reference tables were loaded from
    pub source_dir: PathBuf,

    /// Number of display-name entries
    pub country_count: usize,

    /// Number of ISO2 -> ISO3 conversions
    pub conversion_count: usize,

    /// Number of Eurozone members
    pub eurozone_member_count: usize,

    /// Timestamp when the registry was loaded
    pub load_time: Instant,

    /// Number of reference files processed
    pub files_processed: usize,
}

/// Statistics collected while loading the reference tables
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// Display-name entries loaded
    pub countries_loaded: usize,

    /// ISO2 -> ISO3 conversions loaded
    pub conversions_loaded: usize,

    /// Eurozone members loaded
    pub eurozone_members_loaded: usize,

    /// Reference files processed
    pub files_processed: usize,

    /// Rows skipped with a warning (malformed codes, empty names)
    pub rows_skipped: usize,

    /// Non-fatal errors encountered during loading
    pub errors: Vec<String>,

    /// Total loading duration
    pub load_duration: Duration,
}

impl LoadStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any non-fatal errors were recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} countries, {} conversions, {} eurozone members from {} files in {:.2}s ({} rows skipped)",
            self.countries_loaded,
            self.conversions_loaded,
            self.eurozone_members_loaded,
            self.files_processed,
            self.load_duration.as_secs_f64(),
            self.rows_skipped
        )
    }
}
