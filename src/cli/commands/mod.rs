//! Command implementations for the ratesmap CLI
//!
//! This module contains the main command execution logic, progress
//! reporting, and error handling for the CLI interface. Each command is
//! implemented in its own module.

pub mod countries;
pub mod process;
pub mod shared;

// Re-export the main types and functions for convenience
pub use shared::ProcessingSummary;

use crate::Result;
use crate::cli::args::{Args, Commands};

/// Main command runner for the ratesmap CLI
///
/// Dispatches to the appropriate subcommand handler based on CLI args:
/// - `process`: run the reshape-join pipeline and export the joined table
/// - `countries`: report on the country reference registry
pub async fn run(args: Args) -> Result<ProcessingSummary> {
    match args.get_command() {
        Some(Commands::Process(process_args)) => process::run_process(process_args).await,
        Some(Commands::Countries(countries_args)) => {
            countries::run_countries(countries_args).await
        }
        None => Err(crate::Error::configuration(
            "No command specified".to_string(),
        )),
    }
}
