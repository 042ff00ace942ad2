//! Row error report for a finished import

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use super::state::ImportOutcome;

/// Pull the row number out of messages like "Row 7: ..." or "Riga 7 - ...".
/// Returns the number and the rest of the message.
pub fn split_row_number(message: &str) -> (Option<u64>, &str) {
    let trimmed = message.trim();

    for prefix in ["row ", "riga "] {
        let matches = trimmed
            .get(..prefix.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(prefix));
        if !matches {
            continue;
        }
        let rest = &trimmed[prefix.len()..];
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if digits_end == 0 {
            break;
        }
        let Ok(row) = rest[..digits_end].parse::<u64>() else {
            break;
        };
        let text = rest[digits_end..].trim_start_matches([':', '-', ' ']).trim();
        return (Some(row), text);
    }

    (None, trimmed)
}

/// Write row errors as CSV (`row`, `message`) to any writer
pub fn write_report<W: Write>(outcome: &ImportOutcome, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["row", "message"])
        .context("Failed to write report header")?;

    for message in &outcome.row_errors {
        let (row, text) = split_row_number(message);
        let row = row.map(|r| r.to_string()).unwrap_or_default();
        csv.write_record([row.as_str(), text])
            .context("Failed to write report row")?;
    }

    csv.flush().context("Failed to flush report")?;
    Ok(())
}

/// Write row errors to a CSV file
pub fn write_report_file(outcome: &ImportOutcome, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    write_report(outcome, file)?;
    log::info!(
        "Wrote {} row errors to {}",
        outcome.row_errors.len(),
        path.display()
    );
    Ok(())
}
