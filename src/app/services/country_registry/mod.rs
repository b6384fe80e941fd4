//! Country reference registry for O(1) code and name lookups
//!
//! This module loads the small reference tables the dashboards join
//! against: the flat ISO2 -> ISO3 conversion map, the ISO3 -> display-name
//! table, and the Eurozone membership table with euro adoption dates. The
//! registry is loaded once per pipeline and never mutated afterwards.

use crate::app::models::{Country, EurozoneMember};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

pub mod loader;
pub mod metadata;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use metadata::{LoadStats, RegistryMetadata};

/// Country reference registry providing O(1) lookups
///
/// Codes resolve to ISO3 either through the conversion map (for ISO2
/// input) or by passing through when already a known ISO3 code. Display
/// names come from the name table; Eurozone membership drives the
/// aggregate-expansion step of the reshaper.
#[derive(Debug, Clone)]
pub struct CountryRegistry {
    /// Display-name entries indexed by ISO3 code
    pub(crate) countries: HashMap<String, Country>,

    /// Flat ISO2 -> ISO3 conversion map
    pub(crate) iso2_to_iso3: HashMap<String, String>,

    /// Eurozone members with adoption dates, in file order
    pub(crate) eurozone: Vec<EurozoneMember>,

    /// Directory the reference tables were loaded from
    pub(crate) source_dir: PathBuf,

    /// Timestamp when the registry was loaded
    pub(crate) load_time: Instant,

    /// Number of reference files processed
    pub(crate) files_processed: usize,
}

impl CountryRegistry {
    /// Create a new empty registry
    pub fn new(source_dir: PathBuf) -> Self {
        Self {
            countries: HashMap::new(),
            iso2_to_iso3: HashMap::new(),
            eurozone: Vec::new(),
            source_dir,
            load_time: Instant::now(),
            files_processed: 0,
        }
    }

    /// Resolve a country code to ISO3 (O(1) lookup)
    ///
    /// ISO2 codes go through the conversion map; codes that already are a
    /// known ISO3 code pass through unchanged. Unknown codes (including
    /// the "XM" aggregate) resolve to `None`.
    pub fn resolve_iso3(&self, code: &str) -> Option<&str> {
        if let Some(iso3) = self.iso2_to_iso3.get(code) {
            return Some(iso3.as_str());
        }

        self.countries.get(code).map(|c| c.iso3.as_str())
    }

    /// Display name for an ISO3 code (O(1) lookup)
    pub fn display_name(&self, iso3: &str) -> Option<&str> {
        self.countries.get(iso3).map(|c| c.name.as_str())
    }

    /// Whether an ISO3 code is present in the name table
    pub fn contains_iso3(&self, iso3: &str) -> bool {
        self.countries.contains_key(iso3)
    }

    /// All Eurozone members, in file order
    pub fn eurozone_members(&self) -> &[EurozoneMember] {
        &self.eurozone
    }

    /// Eurozone members whose adoption date is at/before the given date
    pub fn members_adopted_by(
        &self,
        date: NaiveDate,
    ) -> impl Iterator<Item = &EurozoneMember> {
        self.eurozone.iter().filter(move |m| m.adopted_by(date))
    }

    /// Iterate all display-name entries (unordered)
    pub fn countries(&self) -> impl Iterator<Item = &Country> {
        self.countries.values()
    }

    /// Iterate the ISO2 -> ISO3 conversion pairs (unordered)
    pub fn conversions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iso2_to_iso3.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    /// Number of display-name entries
    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    /// Number of ISO2 -> ISO3 conversions
    pub fn conversion_count(&self) -> usize {
        self.iso2_to_iso3.len()
    }

    /// Registry metadata
    pub fn metadata(&self) -> RegistryMetadata {
        RegistryMetadata {
            source_dir: self.source_dir.clone(),
            country_count: self.countries.len(),
            conversion_count: self.iso2_to_iso3.len(),
            eurozone_member_count: self.eurozone.len(),
            load_time: self.load_time,
            files_processed: self.files_processed,
        }
    }
}
