//! `config` commands

use anyhow::Result;
use clap::Subcommand;
use colored::*;

use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the config file location
    Path,
    /// Set a value in the config file (api.base_url, api.token,
    /// import.check_path, import.confirm_path)
    Set {
        key: String,
        value: String,
    },
}

/// `effective` is the config after environment and flag overrides
pub fn handle_config_command(command: ConfigCommands, effective: &Config) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            println!("{}", "[api]".bold());
            println!("  base_url     = {}", effective.api.base_url);
            println!(
                "  token        = {}",
                effective
                    .api
                    .masked_token()
                    .unwrap_or_else(|| "(not set)".dimmed().to_string())
            );
            println!("{}", "[import]".bold());
            println!("  check_path   = {}", effective.import.check_path);
            println!("  confirm_path = {}", effective.import.confirm_path);
        }
        ConfigCommands::Path => {
            println!("{}", Config::path()?.display());
        }
        ConfigCommands::Set { key, value } => {
            // Edit the file itself, not the overridden view
            let path = Config::path()?;
            let mut config = Config::load_from(&path)?;
            config.set(&key, &value)?;
            config.save_to(&path)?;
            log::info!("Updated {} in {}", key, path.display());
            println!("{} Updated {}", "✓".green(), key);
        }
    }
    Ok(())
}
