//! apiregions CLI
//!
//! Command-line interface for API region resolution and overlap checks

use apiregions_core::logging_facility::{init, Profile};
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod config;
mod selection;

#[derive(Debug, Parser)]
#[command(name = "apiregions")]
#[command(about = "apiregions - API region resolution and export overlap checks", long_about = None)]
struct Cli {
    /// Log output format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fail when packages are exported by more than one feature region
    Overlap(commands::overlap::OverlapArgs),
    /// Print the resolved regions of one feature
    Regions(commands::regions::RegionsArgs),
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Text => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Overlap(args) => commands::overlap::execute(args),
        Commands::Regions(args) => commands::regions::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
