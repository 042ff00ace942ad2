//! State types for the import wizard
//!
//! The wizard moves through three steps. Each step variant owns the data that
//! only exists while the wizard is in that step, so there is no way to hold
//! import results while still uploading, or a column mapping without a file
//! token.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::api::models::{ColumnAnalysis, ConfirmRequest, ImportSummary, MatchedColumn};

use super::error::ImportError;

/// One run of the wizard, from opening the dialog to closing it
#[derive(Debug, Clone)]
pub struct State {
    /// Responses tagged with another session id are stale and get dropped
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub step: ImportStep,
}

impl State {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            step: ImportStep::default(),
        }
    }

    /// Whether a network call is outstanding for this session
    pub fn is_busy(&self) -> bool {
        match &self.step {
            ImportStep::Upload(upload) => upload.is_checking(),
            ImportStep::Mapping(mapping) => mapping.submitting,
            ImportStep::Result(_) => false,
        }
    }

    /// Error to show inline on the current step
    pub fn error(&self) -> Option<&ImportError> {
        match &self.step {
            ImportStep::Upload(upload) => upload.error.as_ref(),
            ImportStep::Mapping(mapping) => mapping.error.as_ref(),
            ImportStep::Result(_) => None,
        }
    }

    pub fn step_kind(&self) -> StepKind {
        self.step.kind()
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Wizard steps, each carrying its own data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStep {
    Upload(UploadState),
    Mapping(MappingState),
    Result(ImportOutcome),
}

impl Default for ImportStep {
    fn default() -> Self {
        Self::Upload(UploadState::default())
    }
}

impl ImportStep {
    pub fn kind(&self) -> StepKind {
        match self {
            Self::Upload(_) => StepKind::Upload,
            Self::Mapping(_) => StepKind::Mapping,
            Self::Result(_) => StepKind::Result,
        }
    }
}

/// Data-less view of the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Upload,
    Mapping,
    Result,
}

impl StepKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upload => "Upload",
            Self::Mapping => "Column mapping",
            Self::Result => "Result",
        }
    }

    /// 1-based position, for "Step n of 3" displays
    pub fn position(&self) -> usize {
        match self {
            Self::Upload => 1,
            Self::Mapping => 2,
            Self::Result => 3,
        }
    }
}

/// Step 1: pick a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadState {
    /// Name of the file currently being checked by the server
    pub checking: Option<String>,
    pub error: Option<ImportError>,
}

impl UploadState {
    pub fn is_checking(&self) -> bool {
        self.checking.is_some()
    }
}

/// Server-side handle to the uploaded file.
///
/// Token and extension always come from the same check response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub token: String,
    pub extension: String,
}

/// Step 2: decide what to do with the columns the server could not match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingState {
    pub file: UploadedFile,
    /// Columns the server matched on its own, shown read-only
    pub matched_columns: Vec<MatchedColumn>,
    /// Columns needing a decision, in spreadsheet order
    pub unmatched_columns: Vec<String>,
    /// Target fields the server accepts
    pub available_fields: Vec<String>,
    /// Unmatched column -> chosen target; `None` means skip
    column_mapping: BTreeMap<String, Option<String>>,
    pub submitting: bool,
    pub error: Option<ImportError>,
}

impl MappingState {
    /// Build the mapping step from a successful check response. Every
    /// unmatched column starts out skipped.
    pub fn from_analysis(analysis: ColumnAnalysis) -> Self {
        let mut unmatched_columns = Vec::with_capacity(analysis.unmatched_excel_columns.len());
        for column in analysis.unmatched_excel_columns {
            if !unmatched_columns.contains(&column) {
                unmatched_columns.push(column);
            }
        }

        let column_mapping = unmatched_columns
            .iter()
            .map(|column| (column.clone(), None))
            .collect();

        Self {
            file: UploadedFile {
                token: analysis.file_token,
                extension: analysis.file_extension,
            },
            matched_columns: analysis.matched_columns,
            unmatched_columns,
            available_fields: analysis.all_db_columns,
            column_mapping,
            submitting: false,
            error: None,
        }
    }

    pub fn column_mapping(&self) -> &BTreeMap<String, Option<String>> {
        &self.column_mapping
    }

    /// Current choice for an unmatched column (`None` when skipped or unknown)
    pub fn target_for(&self, column: &str) -> Option<&str> {
        self.column_mapping.get(column).and_then(|t| t.as_deref())
    }

    /// Overwrite the choice for one unmatched column.
    ///
    /// An empty target means skip. A non-empty target must be one of the
    /// fields the server offered, when the server offered any.
    pub fn set_mapping(&mut self, column: &str, target: Option<String>) -> Result<(), ImportError> {
        let target = target
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let Some(entry) = self.column_mapping.get_mut(column) else {
            return Err(ImportError::UnknownColumn(column.to_string()));
        };

        if let Some(t) = &target {
            if !self.available_fields.is_empty() && !self.available_fields.contains(t) {
                return Err(ImportError::UnknownTarget {
                    column: column.to_string(),
                    target: t.clone(),
                });
            }
        }

        *entry = target;
        Ok(())
    }

    /// Mapping to submit: every matched column plus every unmatched column
    /// that was not skipped
    pub fn final_mapping(&self) -> BTreeMap<String, String> {
        let mut mapping: BTreeMap<String, String> = self
            .matched_columns
            .iter()
            .map(|m| (m.excel_column.clone(), m.db_column.clone()))
            .collect();

        for (column, target) in &self.column_mapping {
            if let Some(target) = target {
                mapping.insert(column.clone(), target.clone());
            }
        }

        mapping
    }

    /// Unmatched columns currently set to skip, in spreadsheet order
    pub fn skipped_columns(&self) -> Vec<&str> {
        self.unmatched_columns
            .iter()
            .filter(|c| self.target_for(c).is_none())
            .map(|c| c.as_str())
            .collect()
    }

    pub fn confirm_request(&self) -> ConfirmRequest {
        ConfirmRequest {
            file_token: self.file.token.clone(),
            file_extension: self.file.extension.clone(),
            mapping: self.final_mapping(),
        }
    }
}

/// Step 3: what the server imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub imported_count: u64,
    /// Per-row problems; warnings, not failures of the import
    pub row_errors: Vec<String>,
}

impl From<ImportSummary> for ImportOutcome {
    fn from(summary: ImportSummary) -> Self {
        Self {
            imported_count: summary.imported_count,
            row_errors: summary.errors.unwrap_or_default(),
        }
    }
}

impl ImportOutcome {
    pub fn has_warnings(&self) -> bool {
        !self.row_errors.is_empty()
    }
}
