use clap::Parser;
use ratesmap::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(commands::run(args));

    match result {
        Ok(_summary) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Ratesmap - Dashboard Data Pipeline");
    println!("==================================");
    println!();
    println!("Tidy wide-format BIS exports of central bank policy rates and consumer");
    println!("price indices into the joined table a choropleth dashboard renders.");
    println!();
    println!("USAGE:");
    println!("    ratesmap <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process      Run the reshape-join pipeline and export the joined table");
    println!("    countries    Report on the country reference registry");
    println!("    help         Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Run the pipeline over the default data directory:");
    println!("    ratesmap process");
    println!();
    println!("    # Custom inputs, interpolation, and a filtered Parquet export:");
    println!("    ratesmap process --data-dir ./data --fill interpolate \\");
    println!("                     --year 2020 --month 6 --countries DEU,FRA \\");
    println!("                     --output joined.parquet --format parquet");
    println!();
    println!("    # Report Eurozone members with adoption dates:");
    println!("    ratesmap countries --eurozone --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    ratesmap <COMMAND> --help");
}
