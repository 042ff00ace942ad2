use anyhow::Result;
use clap::Parser;
use colored::*;

use crm_cli::cli::commands::{config as config_cmd, fields, import as import_cmd, preview};
use crm_cli::cli::{Cli, Commands};
use crm_cli::config::Config;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut config = Config::load()?;
    if let Some(url) = cli.api_url.as_deref() {
        config.set("api.base_url", url)?;
    }

    match cli.command {
        Commands::Import(args) => import_cmd::handle_import_command(args, &config).await,
        Commands::Preview(args) => preview::handle_preview_command(args),
        Commands::Fields => {
            fields::handle_fields_command();
            Ok(())
        }
        Commands::Config(command) => config_cmd::handle_config_command(command, &config),
    }
}

/// `RUST_LOG` wins over `-v` flags
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
