//! `preview` command: local look at a spreadsheet's columns

use anyhow::Result;
use clap::Args;
use colored::*;
use std::path::PathBuf;

use crate::import::fields::field_display;
use crate::import::preview::read_preview;

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Spreadsheet to inspect
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

pub fn handle_preview_command(args: PreviewArgs) -> Result<()> {
    let preview = read_preview(&args.file)?;

    println!(
        "{} ({} data rows)",
        args.file.display().to_string().cyan(),
        preview.data_rows
    );

    if preview.headers.is_empty() {
        println!("  {}", "No header row found".yellow());
        return Ok(());
    }

    for column in preview.columns() {
        match column.guess {
            Some(field) => println!(
                "  {} {} {}",
                "✓".green(),
                column.header,
                format!("→ {}", field_display(field)).dimmed()
            ),
            None => println!("  {} {}", "?".yellow(), column.header),
        }
    }

    println!();
    println!(
        "{}",
        "Guesses are local; the server decides the final matches on import.".dimmed()
    );
    Ok(())
}
