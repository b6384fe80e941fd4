//! Reshaping statistics

use crate::app::models::Indicator;
use std::time::Duration;

/// Statistics for one reshape call
#[derive(Debug, Clone)]
pub struct ReshapeStats {
    /// Indicator the reshape produced
    pub indicator: Indicator,

    /// Areas in the source table
    pub areas_in: usize,

    /// Date columns at/after the cutoff
    pub dates_in_window: usize,

    /// Gaps closed by the missing-value policy
    pub cells_filled: usize,

    /// Members that received aggregate values
    pub members_expanded: usize,

    /// National values overwritten by the aggregate
    pub values_overwritten: usize,

    /// Tidy records emitted
    pub records_emitted: usize,

    /// Reshape duration
    pub duration: Duration,
}

impl ReshapeStats {
    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} records from {} areas x {} dates ({} cells filled, {} members expanded, {} values overwritten) in {:.2}s",
            self.records_emitted,
            self.areas_in,
            self.dates_in_window,
            self.cells_filled,
            self.members_expanded,
            self.values_overwritten,
            self.duration.as_secs_f64()
        )
    }
}
