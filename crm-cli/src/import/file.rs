//! Spreadsheet files selected for import
//!
//! Browsers and operating systems report MIME types for `.csv` files
//! inconsistently, so a file is accepted when either its declared media type
//! or its file name extension is one of the supported spreadsheet formats.

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;

/// Message shown when a file is rejected by the format gate
pub const ACCEPTED_FORMATS_MESSAGE: &str =
    "Unsupported file format. Accepted formats: .xlsx, .xls, .csv";

/// Supported spreadsheet formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpreadsheetFormat {
    Xlsx,
    Xls,
    Csv,
}

impl SpreadsheetFormat {
    pub const ALL: [SpreadsheetFormat; 3] = [Self::Xlsx, Self::Xls, Self::Csv];

    /// Extension including the leading dot, as the server expects it
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => ".xlsx",
            Self::Xls => ".xls",
            Self::Csv => ".csv",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Xls => "application/vnd.ms-excel",
            Self::Csv => "text/csv",
        }
    }

    /// Look up a format from a file name (case-insensitive extension match)
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xlsx" => Some(Self::Xlsx),
            "xls" => Some(Self::Xls),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Look up a format from a declared media type, ignoring parameters
    /// such as `; charset=utf-8`
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.media_type() == essence)
    }
}

impl fmt::Display for SpreadsheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// A file picked by the user, as handed to the import wizard
#[derive(Clone, PartialEq, Eq)]
pub struct SpreadsheetFile {
    pub name: String,
    /// Media type reported by whoever picked the file; may be empty or generic
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SpreadsheetFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, deriving its media type from the extension.
    ///
    /// Unknown extensions get `application/octet-stream`; the format gate
    /// rejects them later, when the file is selected.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let media_type = SpreadsheetFormat::from_file_name(&name)
            .map(|f| f.media_type())
            .unwrap_or("application/octet-stream")
            .to_string();

        Ok(Self::new(name, media_type, bytes))
    }

    /// Resolve the spreadsheet format, preferring the declared media type and
    /// falling back to the file name extension
    pub fn format(&self) -> Option<SpreadsheetFormat> {
        SpreadsheetFormat::from_media_type(&self.media_type)
            .or_else(|| SpreadsheetFormat::from_file_name(&self.name))
    }

    pub fn is_accepted(&self) -> bool {
        self.format().is_some()
    }

    /// Media type to send on upload: the declared one when it is meaningful,
    /// otherwise the canonical type of the detected format
    pub fn upload_media_type(&self) -> String {
        if SpreadsheetFormat::from_media_type(&self.media_type).is_some() {
            return self.media_type.clone();
        }
        self.format()
            .map(|f| f.media_type().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string())
    }
}

// Keep file contents out of debug output
impl fmt::Debug for SpreadsheetFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpreadsheetFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
