//! Process command implementation for the ratesmap CLI
//!
//! Runs the complete pipeline: load the wide exports and reference
//! tables, reshape both indicators, join them, optionally filter to one
//! (year, month, countries) selection, and optionally export the result.

use super::shared::{ProcessingSummary, setup_logging};
use crate::app::services::{frame_export, selector};
use crate::cli::args::{ExportFormat, ProcessArgs};
use crate::{DashboardPipeline, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::time::Instant;
use tracing::info;

/// Pipeline stages reported on the progress bar
const STAGES: &[&str] = &[
    "Loading inputs",
    "Reshaping and joining",
    "Filtering",
    "Exporting",
];

/// Run the process command
pub async fn run_process(args: ProcessArgs) -> Result<ProcessingSummary> {
    args.validate()?;
    setup_logging(args.get_log_level(), args.quiet)?;

    let start_time = Instant::now();
    let config = args.to_config()?;

    let progress = if args.show_progress() {
        let pb = ProgressBar::new(STAGES.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let set_stage = |index: usize| {
        if let Some(pb) = &progress {
            pb.set_position(index as u64);
            pb.set_message(STAGES[index]);
        }
    };

    set_stage(0);
    let pipeline = DashboardPipeline::load(config).await?;

    set_stage(1);
    let joined = pipeline.joined()?;

    set_stage(2);
    let selection = args.filter_selection();
    let exported: Vec<_> = match &selection {
        Some((year, month, countries)) => {
            selector::filter_period(&joined, *year, *month, countries)
        }
        None => joined.as_ref().clone(),
    };

    set_stage(3);
    let output = match &args.output {
        Some(path) => {
            let size = match args.format {
                ExportFormat::Csv => frame_export::write_csv(&exported, path)?,
                ExportFormat::Parquet => frame_export::write_parquet(&exported, path)?,
            };
            info!("Wrote joined table to {}", path.display());
            Some((path.clone(), size))
        }
        None => None,
    };

    if let Some(pb) = &progress {
        pb.finish_with_message("Pipeline complete");
    }

    let countries: HashSet<&str> = joined.iter().map(|r| r.iso3.as_str()).collect();
    let date_range = joined
        .iter()
        .map(|r| r.date)
        .fold(None, |range, date| match range {
            None => Some((date, date)),
            Some((min, max)) => Some((min.min(date), max.max(date))),
        });

    let summary = ProcessingSummary {
        rows_joined: joined.len(),
        countries: countries.len(),
        date_range,
        rows_filtered: selection.as_ref().map(|_| exported.len()),
        output,
        processing_time: start_time.elapsed(),
    };

    if !args.quiet {
        print_summary(&summary);
    }

    Ok(summary)
}

/// Print the human-readable processing summary
fn print_summary(summary: &ProcessingSummary) {
    println!();
    println!("{}", "Pipeline complete".green().bold());
    println!("  Rows joined:     {}", summary.rows_joined);
    println!("  Countries:       {}", summary.countries);

    if let Some((first, last)) = summary.date_range {
        println!("  Date range:      {} to {}", first, last);
    }

    if let Some(filtered) = summary.rows_filtered {
        println!("  Rows after filter: {}", filtered);
    }

    match &summary.output {
        Some((path, size)) => {
            println!(
                "  Output:          {} ({})",
                path.display(),
                ProcessingSummary::format_size(*size).cyan()
            );
        }
        None => {
            println!("  Output:          {}", "not written (no --output)".dimmed());
        }
    }

    println!(
        "  Elapsed:         {:.2}s",
        summary.processing_time.as_secs_f64()
    );
}
