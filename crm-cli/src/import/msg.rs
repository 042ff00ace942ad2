//! Messages for the import wizard
//!
//! User actions and completions of the network calls started by the wizard.

use uuid::Uuid;

use crate::api::models::{ColumnAnalysis, ImportSummary};

use super::error::ImportError;
use super::file::SpreadsheetFile;

#[derive(Debug, Clone)]
pub enum Msg {
    // === Step 1: Upload ===
    /// User picked or dropped a file
    SelectFile(SpreadsheetFile),
    /// Check call finished for the given session
    CheckCompleted {
        session: Uuid,
        result: Result<ColumnAnalysis, ImportError>,
    },

    // === Step 2: Mapping ===
    /// Map an unmatched column to a target field, or skip it with `None`
    SetMapping {
        column: String,
        target: Option<String>,
    },
    /// Submit the final mapping
    Submit,
    /// Confirm call finished for the given session
    ConfirmCompleted {
        session: Uuid,
        result: Result<ImportSummary, ImportError>,
    },
    /// Go back to the upload step, discarding the analysis
    Back,

    // === General ===
    /// Cancel, dismiss, or acknowledge the result
    Close,
    DismissError,
}
