//! filterx CLI
//!
//! Command-line interface for inspecting and editing query-string filters

use clap::{Parser, Subcommand, ValueEnum};
use filterx_core::logging_facility::{self, Profile};

mod commands;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Off,
    Pretty,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "filterx")]
#[command(about = "filterx - Edit boolean filters carried in query strings", long_about = None)]
struct Cli {
    /// Log format on stderr
    #[arg(long, global = true, value_enum, default_value = "off")]
    log: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse a filter and print it as an outline or JSON
    Show(commands::show::ShowArgs),
    /// Apply edit-form fields to a filter and print the new query string
    Apply(commands::apply::ApplyArgs),
    /// Run one editor request and print the redirect or the rendered view
    Handle(commands::handle::HandleArgs),
}

fn main() {
    let cli = Cli::parse();

    logging_facility::init(match cli.log {
        LogFormat::Off => Profile::Test,
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let result = match cli.command {
        Commands::Show(args) => commands::show::execute(args),
        Commands::Apply(args) => commands::apply::execute(args),
        Commands::Handle(args) => commands::handle::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
