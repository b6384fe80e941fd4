//! Reference table loading for the country registry
//!
//! This module reads the three small reference tables: the flat
//! ISO2 -> ISO3 JSON map, the ISO3 -> display-name CSV, and the Eurozone
//! membership CSV. The name table is decoded Latin-1 tolerant so accented
//! display names survive regardless of the export's encoding.

use super::CountryRegistry;
use super::metadata::LoadStats;
use crate::app::models::{Country, EurozoneMember};
use crate::config::PipelineConfig;
use crate::constants::{DATE_FORMAT, DEFAULT_COUNTRY_NAMES_FILENAME, DEFAULT_EUROZONE_FILENAME,
    DEFAULT_ISO_CONVERSIONS_FILENAME, columns};
use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Decode bytes as Latin-1
///
/// Every byte value maps to the Unicode code point of the same value, so
/// the decode cannot fail; UTF-8 input restricted to the Latin-1 range
/// round-trips unchanged.
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

impl CountryRegistry {
    /// Load the registry from the reference tables named by a pipeline
    /// configuration
    ///
    /// # Arguments
    /// * `config` - Pipeline configuration with reference table paths
    ///
    /// # Returns
    /// * `Result<(CountryRegistry, LoadStats)>` - Registry and loading
    ///   statistics
    ///
    /// # Errors
    /// * `Error::CountryRegistry` if a reference table is missing
    /// * `Error::JsonParsing` / `Error::CsvParsing` for malformed tables
    /// * `Error::DateParsing` for a malformed adoption date
    pub async fn load(config: &PipelineConfig) -> Result<(Self, LoadStats)> {
        Self::load_from_paths(
            &config.data_dir,
            &config.iso_conversions_file,
            &config.country_names_file,
            &config.eurozone_file,
        )
        .await
    }

    /// Load the registry from a directory holding the default file names
    pub async fn load_from_dir(dir: &Path) -> Result<(Self, LoadStats)> {
        Self::load_from_paths(
            dir,
            &dir.join(DEFAULT_ISO_CONVERSIONS_FILENAME),
            &dir.join(DEFAULT_COUNTRY_NAMES_FILENAME),
            &dir.join(DEFAULT_EUROZONE_FILENAME),
        )
        .await
    }

    async fn load_from_paths(
        source_dir: &Path,
        iso_conversions: &Path,
        country_names: &Path,
        eurozone: &Path,
    ) -> Result<(Self, LoadStats)> {
        info!(
            "Loading country registry from: {}",
            source_dir.display()
        );

        let start_time = Instant::now();
        let mut registry = Self::new(source_dir.to_path_buf());
        let mut stats = LoadStats::new();

        for path in [iso_conversions, country_names, eurozone] {
            if !path.exists() {
                return Err(Error::country_registry(format!(
                    "Reference table not found: {}",
                    path.display()
                )));
            }
        }

        registry.iso2_to_iso3 = load_iso_conversions(iso_conversions)?;
        stats.conversions_loaded = registry.iso2_to_iso3.len();
        stats.files_processed += 1;

        registry.countries = load_country_names(country_names, &mut stats)?;
        stats.countries_loaded = registry.countries.len();
        stats.files_processed += 1;

        registry.eurozone = load_eurozone_members(eurozone, &mut stats)?;
        stats.eurozone_members_loaded = registry.eurozone.len();
        stats.files_processed += 1;

        registry.load_time = start_time;
        registry.files_processed = stats.files_processed;
        stats.load_duration = start_time.elapsed();

        info!("Country registry loaded: {}", stats.summary());

        Ok((registry, stats))
    }
}

/// Load the flat ISO2 -> ISO3 conversion map
fn load_iso_conversions(path: &Path) -> Result<HashMap<String, String>> {
    debug!("Loading ISO conversion map: {}", path.display());

    let content = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

    let conversions: HashMap<String, String> =
        serde_json::from_str(&content).map_err(|e| {
            Error::json_parsing(
                path.to_string_lossy().to_string(),
                "ISO conversion map is not a flat string-to-string object".to_string(),
                Some(e),
            )
        })?;

    debug!(
        "Loaded {} ISO2 -> ISO3 conversions from {}",
        conversions.len(),
        path.display()
    );

    Ok(conversions)
}

/// Load the ISO3 -> display-name table (Latin-1 tolerant)
fn load_country_names(path: &Path, stats: &mut LoadStats) -> Result<HashMap<String, Country>> {
    debug!("Loading country-name table: {}", path.display());

    let bytes = fs::read(path)
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;
    let content = decode_latin1(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| {
            Error::csv_parsing(
                path.to_string_lossy().to_string(),
                "Failed to read CSV header".to_string(),
                Some(e),
            )
        })?
        .clone();

    let iso3_index = find_column(&headers, columns::ISO3, path)?;
    let name_index = find_column(&headers, columns::NAME, path)?;

    let mut countries = HashMap::new();
    let mut record = StringRecord::new();

    while reader.read_record(&mut record).map_err(|e| {
        Error::csv_parsing(
            path.to_string_lossy().to_string(),
            "Failed to read CSV record".to_string(),
            Some(e),
        )
    })? {
        let iso3 = record.get(iso3_index).unwrap_or("").trim().to_string();
        let name = record.get(name_index).unwrap_or("").trim().to_string();

        match Country::new(iso3, name) {
            Ok(country) => match countries.entry(country.iso3.clone()) {
                Entry::Vacant(e) => {
                    e.insert(country);
                }
                Entry::Occupied(_) => {
                    warn!(
                        "Duplicate country entry for '{}' in {}, keeping first occurrence",
                        country.iso3,
                        path.display()
                    );
                    stats.rows_skipped += 1;
                }
            },
            Err(e) => {
                warn!(
                    "Skipping malformed country row in {}: {}",
                    path.display(),
                    e
                );
                stats.rows_skipped += 1;
                stats.errors.push(format!("{}: {}", path.display(), e));
            }
        }
    }

    Ok(countries)
}

/// Load the Eurozone membership table
///
/// Malformed adoption dates are fatal (the expansion step cannot decide a
/// substitution boundary without them); malformed codes are skipped with a
/// warning like any other reference-data defect.
fn load_eurozone_members(path: &Path, stats: &mut LoadStats) -> Result<Vec<EurozoneMember>> {
    debug!("Loading Eurozone membership table: {}", path.display());

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| {
            Error::csv_parsing(
                path.to_string_lossy().to_string(),
                "Failed to open CSV file".to_string(),
                Some(e),
            )
        })?;

    let headers = reader
        .headers()
        .map_err(|e| {
            Error::csv_parsing(
                path.to_string_lossy().to_string(),
                "Failed to read CSV header".to_string(),
                Some(e),
            )
        })?
        .clone();

    let iso2_index = find_column(&headers, columns::ISO2, path)?;
    let iso3_index = find_column(&headers, columns::ISO3, path)?;
    let adoption_index = find_column(&headers, columns::ADOPTION, path)?;

    let mut members = Vec::new();
    let mut record = StringRecord::new();

    while reader.read_record(&mut record).map_err(|e| {
        Error::csv_parsing(
            path.to_string_lossy().to_string(),
            "Failed to read CSV record".to_string(),
            Some(e),
        )
    })? {
        let iso2 = record.get(iso2_index).unwrap_or("").trim().to_string();
        let iso3 = record.get(iso3_index).unwrap_or("").trim().to_string();
        let adoption_str = record.get(adoption_index).unwrap_or("").trim();

        let adoption = chrono::NaiveDate::parse_from_str(adoption_str, DATE_FORMAT)
            .map_err(|e| {
                Error::date_parsing(
                    format!(
                        "Invalid adoption date '{}' in {}",
                        adoption_str,
                        path.display()
                    ),
                    e,
                )
            })?;

        match EurozoneMember::new(iso2, iso3, adoption) {
            Ok(member) => members.push(member),
            Err(e) => {
                warn!(
                    "Skipping malformed membership row in {}: {}",
                    path.display(),
                    e
                );
                stats.rows_skipped += 1;
                stats.errors.push(format!("{}: {}", path.display(), e));
            }
        }
    }

    Ok(members)
}

/// Position of a required column in a CSV header
fn find_column(headers: &StringRecord, name: &str, path: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|label| label.trim() == name)
        .ok_or_else(|| {
            Error::csv_parsing(
                path.to_string_lossy().to_string(),
                format!("Missing required '{}' column", name),
                None,
            )
        })
}
