//! Terminal output for the import wizard steps

use colored::*;

use crate::import::fields::field_display;
use crate::import::{ImportOutcome, MappingState, StepKind};

/// Warnings shown inline before pointing at the report
const MAX_INLINE_WARNINGS: usize = 20;

/// Spreadsheet headers longer than this are cut in listings
const MAX_COLUMN_WIDTH: usize = 40;

pub fn print_step(step: StepKind) {
    println!();
    println!(
        "{} {}",
        format!("[{}/3]", step.position()).dimmed(),
        step.label().bold()
    );
}

pub fn print_matched_columns(mapping: &MappingState) {
    if mapping.matched_columns.is_empty() {
        println!("  {}", "No columns were matched automatically".yellow());
        return;
    }

    println!("  Matched automatically:");
    for m in &mapping.matched_columns {
        println!(
            "    {} {} {}",
            "✓".green(),
            truncate_str(&m.excel_column, MAX_COLUMN_WIDTH),
            format!("→ {}", field_display(&m.db_column)).dimmed()
        );
    }
}

pub fn print_unmatched_summary(mapping: &MappingState) {
    if mapping.unmatched_columns.is_empty() {
        return;
    }
    println!(
        "  {} column(s) need a decision: {}",
        mapping.unmatched_columns.len().to_string().yellow(),
        mapping.unmatched_columns.join(", ")
    );
}

/// The mapping about to be submitted, with skipped columns listed separately
pub fn print_final_mapping(mapping: &MappingState) {
    let final_mapping = mapping.final_mapping();

    println!();
    println!("  Columns to import:");
    for (column, target) in &final_mapping {
        println!(
            "    {} → {}",
            truncate_str(column, MAX_COLUMN_WIDTH).cyan(),
            field_display(target)
        );
    }

    let skipped = mapping.skipped_columns();
    if !skipped.is_empty() {
        println!("  Skipped:");
        for column in skipped {
            println!(
                "    {} {}",
                "-".dimmed(),
                truncate_str(column, MAX_COLUMN_WIDTH).dimmed()
            );
        }
    }
}

pub fn print_outcome(outcome: &ImportOutcome, elapsed: chrono::Duration) {
    println!(
        "  {} {} client(s) imported in {:.1}s",
        "✓".green(),
        outcome.imported_count.to_string().bright_green().bold(),
        elapsed.num_milliseconds() as f64 / 1000.0
    );

    if !outcome.has_warnings() {
        return;
    }

    println!(
        "  {} {} row(s) reported problems:",
        "⚠".yellow(),
        outcome.row_errors.len()
    );
    for message in outcome.row_errors.iter().take(MAX_INLINE_WARNINGS) {
        println!("    {} {}", "•".dimmed(), message.yellow());
    }
    if outcome.row_errors.len() > MAX_INLINE_WARNINGS {
        println!(
            "    {}",
            format!(
                "... and {} more (use --report to save them all)",
                outcome.row_errors.len() - MAX_INLINE_WARNINGS
            )
            .dimmed()
        );
    }
}

/// Truncate a string to max length with ellipsis (UTF-8 safe)
fn truncate_str(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Città", 10), "Città");
        assert_eq!(truncate_str("Ragione Sociale", 8), "Ragione…");
        assert_eq!(truncate_str("àèìòù", 3), "àè…");
    }
}
