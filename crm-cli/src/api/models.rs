//! Wire types for the client import endpoints

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A spreadsheet column the server matched to a target field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedColumn {
    /// Header as it appears in the spreadsheet
    pub excel_column: String,
    /// Target field name (e.g. "ragione_sociale")
    pub db_column: String,
}

impl MatchedColumn {
    pub fn new(excel_column: impl Into<String>, db_column: impl Into<String>) -> Self {
        Self {
            excel_column: excel_column.into(),
            db_column: db_column.into(),
        }
    }
}

/// Response of the check call: the server's analysis of the uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnAnalysis {
    pub file_token: String,
    pub file_extension: String,
    #[serde(default)]
    pub matched_columns: Vec<MatchedColumn>,
    #[serde(default)]
    pub unmatched_excel_columns: Vec<String>,
    #[serde(default)]
    pub all_db_columns: Vec<String>,
}

/// Body of the confirm call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmRequest {
    pub file_token: String,
    pub file_extension: String,
    /// Only the columns the server should import; omitted columns are skipped
    pub mapping: BTreeMap<String, String>,
}

/// Response of the confirm call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported_count: u64,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
}
