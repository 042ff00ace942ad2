//! Command line interface

pub mod commands;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::import::ImportArgs;
use commands::preview::PreviewArgs;

#[derive(Parser)]
#[command(name = "crm-cli", version, about = "Command-line client for the CRM")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Override the API base URL for this run
    #[arg(long, value_name = "URL", global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import clients from a spreadsheet (.xlsx, .xls, .csv)
    Import(ImportArgs),
    /// Show the header row of a spreadsheet without uploading it
    Preview(PreviewArgs),
    /// List the known client fields and their labels
    Fields,
    /// Show or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}
