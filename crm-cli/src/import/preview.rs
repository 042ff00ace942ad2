//! Offline column preview
//!
//! Reads the header row of a spreadsheet locally so the user can see what the
//! server is going to analyze. The guesses made here are informational; the
//! server's check call decides the real matches.

use anyhow::{Context, Result, bail};
use calamine::{Reader, open_workbook_auto};
use std::path::Path;

use super::fields::guess_known_field;
use super::file::SpreadsheetFormat;

/// Header row and size of the first sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetPreview {
    pub headers: Vec<String>,
    /// Non-empty rows after the header
    pub data_rows: usize,
}

/// A header and the known field it looks like, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPreview {
    pub header: String,
    pub guess: Option<&'static str>,
}

impl SheetPreview {
    pub fn columns(&self) -> Vec<ColumnPreview> {
        self.headers
            .iter()
            .map(|header| ColumnPreview {
                header: header.clone(),
                guess: guess_known_field(header),
            })
            .collect()
    }
}

/// Read the header row of a `.xlsx`, `.xls` or `.csv` file
pub fn read_preview(path: &Path) -> Result<SheetPreview> {
    let name = path.to_string_lossy();
    match SpreadsheetFormat::from_file_name(&name) {
        Some(SpreadsheetFormat::Csv) => read_csv_preview(path),
        Some(SpreadsheetFormat::Xlsx | SpreadsheetFormat::Xls) => read_workbook_preview(path),
        None => bail!(
            "Cannot preview {}: {}",
            path.display(),
            super::file::ACCEPTED_FORMATS_MESSAGE
        ),
    }
}

fn read_workbook_preview(path: &Path) -> Result<SheetPreview> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .context("Spreadsheet has no sheets")?
        .clone();

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|row| row.iter().map(|c| c.to_string().trim().to_string()).collect())
        .unwrap_or_default();
    let data_rows = rows
        .filter(|row| row.iter().any(|c| !c.to_string().trim().is_empty()))
        .count();

    Ok(SheetPreview {
        headers: trim_trailing_empty(headers),
        data_rows,
    })
}

fn read_csv_preview(path: &Path) -> Result<SheetPreview> {
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let content = content.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(content))
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let headers = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut data_rows = 0;
    for record in reader.records() {
        let record = record.context("Failed to read CSV row")?;
        if record.iter().any(|f| !f.trim().is_empty()) {
            data_rows += 1;
        }
    }

    Ok(SheetPreview {
        headers: trim_trailing_empty(headers),
        data_rows,
    })
}

/// Spreadsheets exported with an Italian locale use `;`
fn sniff_delimiter(content: &[u8]) -> u8 {
    let first_line = content.split(|b| *b == b'\n').next().unwrap_or_default();
    let count = |d: u8| first_line.iter().filter(|b| **b == d).count();
    if count(b';') > count(b',') { b';' } else { b',' }
}

fn trim_trailing_empty(mut headers: Vec<String>) -> Vec<String> {
    while headers.last().is_some_and(|h| h.is_empty()) {
        headers.pop();
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_preview_with_semicolons_and_bom() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clienti.csv");
        std::fs::write(
            &path,
            "\u{feff}Ragione Sociale;P.IVA;Note interne;\nAcme Srl;0123;vip;\n;;;\nBeta Spa;456;;\n",
        )
        .unwrap();

        let preview = read_preview(&path).unwrap();
        assert_eq!(preview.headers, vec!["Ragione Sociale", "P.IVA", "Note interne"]);
        assert_eq!(preview.data_rows, 2);

        let columns = preview.columns();
        assert_eq!(columns[0].guess, Some("ragione_sociale"));
        assert_eq!(columns[1].guess, Some("p_iva"));
        assert_eq!(columns[2].guess, None);
    }

    #[test]
    fn test_csv_preview_with_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clienti.csv");
        std::fs::write(&path, "Email,Telefono\na@b.it,123\n").unwrap();

        let preview = read_preview(&path).unwrap();
        assert_eq!(preview.headers, vec!["Email", "Telefono"]);
        assert_eq!(preview.data_rows, 1);
    }

    #[test]
    fn test_xlsx_preview() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clienti.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Ragione Sociale").unwrap();
        sheet.write_string(0, 1, "Città").unwrap();
        sheet.write_string(1, 0, "Acme Srl").unwrap();
        sheet.write_string(1, 1, "Milano").unwrap();
        workbook.save(&path).unwrap();

        let preview = read_preview(&path).unwrap();
        assert_eq!(preview.headers, vec!["Ragione Sociale", "Città"]);
        assert_eq!(preview.data_rows, 1);
        assert_eq!(preview.columns()[1].guess, Some("citta"));
    }

    #[test]
    fn test_preview_rejects_other_formats() {
        let err = read_preview(Path::new("notes.txt")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
