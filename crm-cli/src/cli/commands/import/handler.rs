//! Import command handler: drives the import wizard from the terminal

use anyhow::{Context, Result, bail};
use colored::*;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Select};
use is_terminal::IsTerminal;
use std::collections::HashMap;

use super::render;
use super::{ImportArgs, parse_map_args};
use crate::api::CrmClient;
use crate::config::Config;
use crate::import::fields::field_display;
use crate::import::report::write_report_file;
use crate::import::{
    DialogHooks, ImportDialog, ImportService, ImportStep, MappingState, Msg, SpreadsheetFile,
    StepKind,
};

/// Handle `crm-cli import <FILE>`
pub async fn handle_import_command(args: ImportArgs, config: &Config) -> Result<()> {
    let client = CrmClient::new(config);
    log::info!("Importing {} via {}", args.file.display(), client.base_url());

    let hooks = DialogHooks::new().on_success(|outcome| {
        log::info!("Import acknowledged: {} rows", outcome.imported_count);
    });

    run_import(args, client, hooks).await
}

/// Drive one wizard session for `args.file` against `service`
pub async fn run_import<S: ImportService>(
    args: ImportArgs,
    service: S,
    hooks: DialogHooks,
) -> Result<()> {
    let map_args = parse_map_args(&args.map)?;
    let interactive = !args.non_interactive && std::io::stdin().is_terminal();

    if !interactive && !args.yes && !args.dry_run {
        bail!("Not running interactively: pass --yes to import without confirmation");
    }

    let file = SpreadsheetFile::from_path(&args.file)?;

    let mut dialog = ImportDialog::open(service, hooks);
    let started_at = dialog.state().started_at;

    // Step 1: upload and analysis
    render::print_step(StepKind::Upload);
    println!("  Analyzing {}...", file.name.cyan());
    dialog.dispatch(Msg::SelectFile(file)).await;
    if dialog.state().step_kind() != StepKind::Mapping {
        let message = dialog
            .state()
            .error()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "File analysis did not complete".to_string());
        dialog.dispatch(Msg::Close).await;
        bail!(message);
    }

    // Step 2: column mapping
    render::print_step(StepKind::Mapping);
    let mapping = current_mapping(&dialog)?.clone();
    render::print_matched_columns(&mapping);
    render::print_unmatched_summary(&mapping);
    warn_unused_map_args(&map_args, &mapping);

    for column in &mapping.unmatched_columns {
        let target = match map_args.get(column) {
            Some(target) => target.clone(),
            None if interactive => prompt_target(column, &mapping)?,
            None => None,
        };

        dialog
            .dispatch(Msg::SetMapping {
                column: column.clone(),
                target,
            })
            .await;

        if let Some(err) = dialog.state().error() {
            let message = err.to_string();
            dialog.dispatch(Msg::Close).await;
            bail!(message);
        }
    }

    render::print_final_mapping(current_mapping(&dialog)?);

    if args.dry_run {
        println!();
        println!("  {}", "Dry run: nothing was imported".yellow());
        dialog.dispatch(Msg::Close).await;
        return Ok(());
    }

    if !args.yes {
        let proceed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Import with this mapping?")
            .default(true)
            .interact()
            .context("Failed to read confirmation")?;
        if !proceed {
            dialog.dispatch(Msg::Close).await;
            println!("  Import cancelled");
            return Ok(());
        }
    }

    // Step 3: confirm, retrying only when the user asks to
    loop {
        dialog.dispatch(Msg::Submit).await;

        match &dialog.state().step {
            ImportStep::Result(_) => break,
            ImportStep::Mapping(mapping) => {
                let message = mapping
                    .error
                    .as_ref()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "Import did not complete".to_string());
                eprintln!("  {} {}", "✗".red(), message.red());

                let retry = interactive
                    && Confirm::with_theme(&ColorfulTheme::default())
                        .with_prompt("Retry the import with the same file?")
                        .default(false)
                        .interact()
                        .context("Failed to read confirmation")?;
                if !retry {
                    dialog.dispatch(Msg::Close).await;
                    bail!(message);
                }
            }
            ImportStep::Upload(_) => bail!("Import session was reset unexpectedly"),
        }
    }

    render::print_step(StepKind::Result);
    let outcome = match &dialog.state().step {
        ImportStep::Result(outcome) => outcome.clone(),
        other => bail!("Expected the result step, wizard is at {:?}", other.kind()),
    };
    render::print_outcome(&outcome, chrono::Utc::now() - started_at);

    // The import is done server side; acknowledge it before any local I/O
    dialog.dispatch(Msg::Close).await;

    if let Some(path) = &args.report {
        write_report_file(&outcome, path)?;
        println!("  Report written to {}", path.display().to_string().cyan());
    }

    Ok(())
}

fn current_mapping<S: ImportService>(dialog: &ImportDialog<S>) -> Result<&MappingState> {
    match &dialog.state().step {
        ImportStep::Mapping(mapping) => Ok(mapping),
        other => bail!("Expected the mapping step, wizard is at {:?}", other.kind()),
    }
}

/// `--map` entries that do not name an unmatched column do nothing; say so
fn warn_unused_map_args(map_args: &HashMap<String, Option<String>>, mapping: &MappingState) {
    for column in map_args.keys() {
        if mapping.unmatched_columns.contains(column) {
            continue;
        }
        let reason = if mapping
            .matched_columns
            .iter()
            .any(|m| &m.excel_column == column)
        {
            "it was matched automatically"
        } else {
            "the file has no such column"
        };
        eprintln!(
            "  {} Ignoring --map for '{}': {}",
            "⚠".yellow(),
            column,
            reason
        );
    }
}

/// Ask the user where an unmatched column should go. Returns `None` for skip.
fn prompt_target(column: &str, mapping: &MappingState) -> Result<Option<String>> {
    let mut items = vec!["Skip this column".to_string()];
    items.extend(mapping.available_fields.iter().map(|f| field_display(f)));

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Map \"{}\" to", column))
        .items(&items)
        .default(0)
        .interact()
        .context("Failed to read column mapping")?;

    Ok(match selection {
        0 => None,
        i => mapping.available_fields.get(i - 1).cloned(),
    })
}
