//! Countries command implementation for the ratesmap CLI
//!
//! Reports on the country reference registry: summary counts, the full
//! country listing, or the Eurozone membership with adoption dates, in
//! human-readable, JSON, or CSV form.

use super::shared::{ProcessingSummary, setup_logging};
use crate::app::services::country_registry::CountryRegistry;
use crate::cli::args::{CountriesArgs, OutputFormat};
use crate::config::PipelineConfig;
use crate::{Error, Result};
use chrono::NaiveDate;
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::time::Instant;

/// One row of the registry report
#[derive(Debug, Clone, Serialize)]
pub struct CountryRow {
    /// ISO 3166-1 alpha-3 code
    pub iso3: String,

    /// Display name
    pub name: String,

    /// Whether the country is a Eurozone member
    pub eurozone: bool,

    /// Euro adoption date, for members
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adoption: Option<NaiveDate>,
}

/// Registry report in all output formats
#[derive(Debug, Clone, Serialize)]
pub struct RegistryReport {
    /// Directory the reference tables were loaded from
    pub source_dir: String,

    /// Display-name entries in the registry
    pub country_count: usize,

    /// ISO2 -> ISO3 conversions in the registry
    pub conversion_count: usize,

    /// Eurozone members in the registry
    pub eurozone_member_count: usize,

    /// Country rows, present for detailed or Eurozone reports
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub countries: Vec<CountryRow>,
}

impl RegistryReport {
    /// Build a report from a loaded registry
    pub fn build(registry: &CountryRegistry, detailed: bool, eurozone_only: bool) -> Self {
        let metadata = registry.metadata();

        let mut countries = Vec::new();
        if detailed || eurozone_only {
            for country in registry.countries() {
                let membership = registry
                    .eurozone_members()
                    .iter()
                    .find(|m| m.iso3 == country.iso3);

                if eurozone_only && membership.is_none() {
                    continue;
                }

                countries.push(CountryRow {
                    iso3: country.iso3.clone(),
                    name: country.name.clone(),
                    eurozone: membership.is_some(),
                    adoption: membership.map(|m| m.adoption),
                });
            }
            countries.sort_by(|a, b| a.iso3.cmp(&b.iso3));
        }

        Self {
            source_dir: metadata.source_dir.display().to_string(),
            country_count: metadata.country_count,
            conversion_count: metadata.conversion_count,
            eurozone_member_count: metadata.eurozone_member_count,
            countries,
        }
    }

    /// Render the report as human-readable text
    pub fn to_human(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("{}", "Country registry".bold()));
        lines.push(format!("  Source:           {}", self.source_dir));
        lines.push(format!("  Countries:        {}", self.country_count));
        lines.push(format!("  ISO conversions:  {}", self.conversion_count));
        lines.push(format!(
            "  Eurozone members: {}",
            self.eurozone_member_count
        ));

        if !self.countries.is_empty() {
            lines.push(String::new());
            for row in &self.countries {
                let membership = match row.adoption {
                    Some(adoption) => format!("  (euro since {})", adoption),
                    None => String::new(),
                };
                lines.push(format!("  {}  {}{}", row.iso3, row.name, membership));
            }
        }

        lines.join("\n")
    }

    /// Render the report as CSV rows
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(["ISO3", "name", "eurozone", "adoption"])
            .map_err(|e| Error::csv_parsing("report", "Failed to write header", Some(e)))?;

        for row in &self.countries {
            let adoption = row
                .adoption
                .map(|d| d.to_string())
                .unwrap_or_default();
            writer
                .write_record([
                    row.iso3.as_str(),
                    row.name.as_str(),
                    if row.eurozone { "true" } else { "false" },
                    adoption.as_str(),
                ])
                .map_err(|e| Error::csv_parsing("report", "Failed to write row", Some(e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| Error::data_validation(format!("Failed to flush CSV report: {}", e)))?;

        String::from_utf8(bytes)
            .map_err(|e| Error::data_validation(format!("CSV report is not valid UTF-8: {}", e)))
    }
}

/// Run the countries command
pub async fn run_countries(args: CountriesArgs) -> Result<ProcessingSummary> {
    args.validate()?;
    setup_logging(args.get_log_level(), false)?;

    let start_time = Instant::now();

    let data_dir = match &args.data_dir {
        Some(dir) => dir.clone(),
        None => PipelineConfig::from_default_location()?.data_dir,
    };

    let (registry, _stats) = CountryRegistry::load_from_dir(&data_dir).await?;
    let report = RegistryReport::build(&registry, args.detailed, args.eurozone);

    let rendered = match args.output_format {
        OutputFormat::Human => report.to_human(),
        OutputFormat::Json => serde_json::to_string_pretty(&report).map_err(|e| {
            Error::json_parsing("report", "Failed to serialize registry report", Some(e))
        })?,
        OutputFormat::Csv => report.to_csv()?,
    };

    match &args.output_file {
        Some(path) => {
            fs::write(path, &rendered)
                .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
            println!("Wrote registry report to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(ProcessingSummary {
        countries: registry.country_count(),
        processing_time: start_time.elapsed(),
        ..ProcessingSummary::default()
    })
}
