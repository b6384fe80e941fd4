//! Join stage: two tidy indicator tables into one presentation table
//!
//! The joiner normalizes country codes to ISO3 through the registry,
//! left-joins the secondary indicator onto the primary on (date, ISO3),
//! merges display names, and synthesizes the hover-text strings the
//! charting layer feeds into its hover templates.
//!
//! Unresolvable codes (including the "XM" aggregate remnant left by the
//! expansion) are a data-quality matter: the rows are dropped with one
//! warning per distinct code, never a fatal error.

use crate::app::models::{Indicator, JoinedRecord, TidyRecord};
use crate::app::services::country_registry::CountryRegistry;
use crate::constants::hover_text;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[cfg(test)]
pub mod tests;

/// Joiner for tidy indicator tables
#[derive(Debug, Clone)]
pub struct Joiner {
    /// Registry resolving codes and display names
    registry: Arc<CountryRegistry>,
}

/// Statistics for one join call
#[derive(Debug, Clone, Default)]
pub struct JoinStats {
    /// Rows in the primary (anchoring) table
    pub primary_rows_in: usize,

    /// Rows in the secondary table
    pub secondary_rows_in: usize,

    /// Rows in the joined output
    pub rows_joined: usize,

    /// Output rows that found a secondary value
    pub rows_matched: usize,

    /// Distinct codes dropped as unresolvable
    pub codes_dropped: Vec<String>,

    /// Join duration
    pub duration: Duration,
}

impl JoinStats {
    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "{} rows joined from {} primary and {} secondary ({} matched, {} codes dropped) in {:.2}s",
            self.rows_joined,
            self.primary_rows_in,
            self.secondary_rows_in,
            self.rows_matched,
            self.codes_dropped.len(),
            self.duration.as_secs_f64()
        )
    }
}

impl Joiner {
    /// Create a new joiner
    pub fn new(registry: Arc<CountryRegistry>) -> Self {
        Self { registry }
    }

    /// Left-join the secondary table onto the primary on (date, ISO3)
    ///
    /// The join is anchored on the primary table: unmatched secondary rows
    /// are dropped, unmatched primary rows keep a missing secondary value.
    /// Each record's own indicator decides which output column it fills.
    ///
    /// # Arguments
    /// * `primary` - The anchoring tidy table (interest rates)
    /// * `secondary` - The tidy table joined on (CPI)
    ///
    /// # Returns
    /// * `(Vec<JoinedRecord>, JoinStats)` - Joined rows in primary order
    ///   and statistics
    pub fn join(
        &self,
        primary: &[TidyRecord],
        secondary: &[TidyRecord],
    ) -> (Vec<JoinedRecord>, JoinStats) {
        let start_time = Instant::now();
        let mut dropped_codes = BTreeSet::new();

        // Index the secondary table by (date, ISO3); first occurrence wins
        let mut secondary_values: HashMap<(NaiveDate, String), (Indicator, Option<f64>)> =
            HashMap::with_capacity(secondary.len());
        for record in secondary {
            let Some(iso3) = self.registry.resolve_iso3(&record.code) else {
                dropped_codes.insert(record.code.clone());
                continue;
            };
            secondary_values
                .entry((record.date, iso3.to_string()))
                .or_insert((record.indicator, record.value));
        }

        let mut joined: Vec<JoinedRecord> = Vec::with_capacity(primary.len());
        let mut seen_keys: HashSet<(NaiveDate, String)> = HashSet::with_capacity(primary.len());
        let mut rows_matched = 0;

        for record in primary {
            let Some(iso3) = self.registry.resolve_iso3(&record.code) else {
                dropped_codes.insert(record.code.clone());
                continue;
            };
            let Some(name) = self.registry.display_name(iso3) else {
                dropped_codes.insert(record.code.clone());
                continue;
            };

            let key = (record.date, iso3.to_string());
            if !seen_keys.insert(key.clone()) {
                // Two source codes resolved to the same country; keep first
                debug!(
                    "Duplicate joined key ({}, {}), keeping first occurrence",
                    record.date, iso3
                );
                continue;
            }

            let mut row = JoinedRecord {
                date: record.date,
                iso3: iso3.to_string(),
                name: name.to_string(),
                interest_rate: None,
                cpi: None,
                interest_rate_text: None,
                cpi_text: None,
            };
            assign_value(&mut row, record.indicator, record.value);

            if let Some((indicator, value)) = secondary_values.get(&key) {
                assign_value(&mut row, *indicator, *value);
                rows_matched += 1;
            }

            joined.push(row);
        }

        for code in &dropped_codes {
            warn!("Dropping unresolvable country code '{}'", code);
        }

        let stats = JoinStats {
            primary_rows_in: primary.len(),
            secondary_rows_in: secondary.len(),
            rows_joined: joined.len(),
            rows_matched,
            codes_dropped: dropped_codes.into_iter().collect(),
            duration: start_time.elapsed(),
        };

        info!("Joined indicators: {}", stats.summary());

        (joined, stats)
    }
}

/// Route a value into the output column its indicator owns
fn assign_value(row: &mut JoinedRecord, indicator: Indicator, value: Option<f64>) {
    match indicator {
        Indicator::PolicyRate => row.interest_rate = value,
        Indicator::Cpi => row.cpi = value,
    }
}

/// Synthesize hover text for one indicator column across the joined table
///
/// The label is dynamic on purpose: the presentation layer asks for
/// columns by name. An unknown label is skipped with a warning rather
/// than failing the pipeline; rows with a missing value keep no text.
pub fn attach_hover_text(records: &mut [JoinedRecord], indicator_label: &str) {
    let Some(indicator) = Indicator::from_label(indicator_label) else {
        warn!(
            "Unknown indicator '{}' requested for hover text, skipping",
            indicator_label
        );
        return;
    };

    for record in records.iter_mut() {
        let text = record
            .value(indicator)
            .map(|value| hover_text(&record.name, value));

        match indicator {
            Indicator::PolicyRate => record.interest_rate_text = text,
            Indicator::Cpi => record.cpi_text = text,
        }
    }

    debug!(
        "Attached hover text for '{}' across {} rows",
        indicator_label,
        records.len()
    );
}
