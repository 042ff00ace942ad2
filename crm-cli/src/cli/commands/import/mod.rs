//! `import` command

pub mod handler;
pub mod render;

use anyhow::{Result, bail};
use clap::Args;
use std::collections::HashMap;
use std::path::PathBuf;

pub use handler::handle_import_command;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Spreadsheet to import
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Map an unmatched column to a field: "Column=field". Leave the field
    /// empty ("Column=") to skip the column. Repeatable.
    #[arg(short, long = "map", value_name = "COLUMN=FIELD")]
    pub map: Vec<String>,

    /// Skip the final confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Never prompt; unmatched columns without --map are skipped
    #[arg(long)]
    pub non_interactive: bool,

    /// Analyze the file and show the mapping without importing
    #[arg(long)]
    pub dry_run: bool,

    /// Write row errors to a CSV file
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Parse `--map` values into column -> target (`None` = skip)
pub fn parse_map_args(values: &[String]) -> Result<HashMap<String, Option<String>>> {
    let mut mappings = HashMap::new();

    for value in values {
        let Some((column, target)) = value.rsplit_once('=') else {
            bail!("Invalid --map value '{}': expected COLUMN=FIELD", value);
        };

        let column = column.trim();
        if column.is_empty() {
            bail!("Invalid --map value '{}': column name is empty", value);
        }

        let target = target.trim();
        let target = if target.is_empty() {
            None
        } else {
            Some(target.to_string())
        };

        if mappings.insert(column.to_string(), target).is_some() {
            bail!("Column '{}' is mapped more than once", column);
        }
    }

    Ok(mappings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_map_args() {
        let values = vec![
            "Note interne=tipologia".to_string(),
            " Zona = regione ".to_string(),
            "Codice=".to_string(),
            "A=B=cap".to_string(),
        ];
        let mappings = parse_map_args(&values).unwrap();

        assert_eq!(mappings["Note interne"].as_deref(), Some("tipologia"));
        assert_eq!(mappings["Zona"].as_deref(), Some("regione"));
        assert_eq!(mappings["Codice"], None);
        // Column names may contain '=', the field never does
        assert_eq!(mappings["A=B"].as_deref(), Some("cap"));
    }

    #[test]
    fn test_parse_map_args_errors() {
        assert!(parse_map_args(&["tipologia".to_string()]).is_err());
        assert!(parse_map_args(&["=tipologia".to_string()]).is_err());
        assert!(
            parse_map_args(&["Zona=regione".to_string(), "Zona=provincia".to_string()]).is_err()
        );
    }
}
