//! Reshaping module: wide series exports into tidy observations
//!
//! This module provides the complete reshaping pipeline for one indicator.
//! It handles the wide-to-long transposition at a cutoff date, the
//! missing-value policy along the date axis, and the expansion of the
//! Eurozone aggregate series into per-member rows.
//!
//! # Architecture
//!
//! The module is organized into logical components:
//! - [`melt`] - Cutoff window resolution and per-area series extraction
//! - [`fill`] - Forward-fill and linear interpolation of gaps
//! - [`eurozone`] - Aggregate ("XM") expansion from each member's accession
//! - [`stats`] - Reshaping statistics
//!
//! # Processing Pipeline
//!
//! The stages run in a fixed order, matching the source dashboards:
//!
//! 1. **Cutoff**: keep the date columns at/after the cutoff; a cutoff that
//!    is not a column is a lookup failure
//! 2. **Fill**: apply the missing-value policy per area
//! 3. **Expansion**: substitute the aggregate value into each member's
//!    series for dates at/after that member's accession
//! 4. **Melt**: emit one tidy record per (area, date)

use crate::app::models::{FillStrategy, Indicator, TidyRecord, WideSeriesTable};
use crate::app::services::country_registry::CountryRegistry;
use crate::Result;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub mod eurozone;
pub mod fill;
pub mod melt;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use eurozone::{ExpansionOutcome, expand_aggregate};
pub use fill::{apply_fill, forward_fill, interpolate};
pub use melt::{SeriesColumns, cutoff_window};
pub use stats::ReshapeStats;

/// Reshaper for one wide series export
///
/// Holds the country registry (for the aggregate expansion) and the
/// missing-value policy. One reshaper serves any number of tables.
#[derive(Debug, Clone)]
pub struct Reshaper {
    /// Registry providing Eurozone membership
    registry: Arc<CountryRegistry>,

    /// Missing-value policy along the date axis
    fill: FillStrategy,
}

impl Reshaper {
    /// Create a new reshaper
    pub fn new(registry: Arc<CountryRegistry>, fill: FillStrategy) -> Self {
        Self { registry, fill }
    }

    /// Reshape a wide table into tidy records for all dates >= cutoff
    ///
    /// # Arguments
    /// * `table` - The wide series export
    /// * `indicator` - Indicator the emitted records belong to
    /// * `cutoff` - First date column to keep
    ///
    /// # Returns
    /// * `Result<(Vec<TidyRecord>, ReshapeStats)>` - Tidy records, with
    ///   (date, code) unique per emitted table, and statistics
    ///
    /// # Errors
    /// * `Error::CutoffNotFound` if the cutoff is not among the table's
    ///   date columns
    pub fn reshape(
        &self,
        table: &WideSeriesTable,
        indicator: Indicator,
        cutoff: NaiveDate,
    ) -> Result<(Vec<TidyRecord>, ReshapeStats)> {
        let start_time = Instant::now();

        let window = cutoff_window(table, cutoff)?;
        let dates: Vec<NaiveDate> = window.dates.to_vec();
        let mut columns = SeriesColumns::from_window(table, window.start);

        debug!(
            "Reshaping {} for {} areas over {} dates (cutoff {})",
            indicator,
            columns.len(),
            dates.len(),
            cutoff
        );

        let mut cells_filled = 0;
        columns.for_each_series(|series| {
            cells_filled += apply_fill(series, self.fill);
        });

        let expansion = expand_aggregate(&mut columns, &dates, &self.registry);

        let records = columns.emit_tidy(&dates, indicator);

        let stats = ReshapeStats {
            indicator,
            areas_in: table.area_count(),
            dates_in_window: dates.len(),
            cells_filled,
            members_expanded: expansion.members_expanded,
            values_overwritten: expansion.values_overwritten,
            records_emitted: records.len(),
            duration: start_time.elapsed(),
        };

        info!("Reshaped {}: {}", indicator, stats.summary());

        Ok((records, stats))
    }
}
