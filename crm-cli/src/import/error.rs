//! User-facing failures of the import wizard
//!
//! Every variant renders as plain text meant to be shown inline on the step
//! where it happened.

use thiserror::Error;

use crate::api::ApiError;

use super::file::ACCEPTED_FORMATS_MESSAGE;

pub const CHECK_FALLBACK_MESSAGE: &str = "Could not analyze the file. Please try again.";
pub const CONFIRM_FALLBACK_MESSAGE: &str = "Import failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// Client-side format gate; no request was made
    #[error("{}", ACCEPTED_FORMATS_MESSAGE)]
    UnsupportedFormat { file_name: String },

    /// The check call failed; the wizard stays on the upload step
    #[error("{0}")]
    Check(String),

    /// The confirm call failed; the wizard stays on the mapping step and the
    /// file token stays usable for a retry
    #[error("{0}")]
    Confirm(String),

    #[error("Column \"{0}\" is not part of the file analysis")]
    UnknownColumn(String),

    #[error("\"{target}\" is not a valid target field for column \"{column}\"")]
    UnknownTarget { column: String, target: String },
}

impl ImportError {
    /// Check failure carrying the server's message, or a generic one
    pub fn check_failed(err: &ApiError) -> Self {
        log::warn!("Import check failed: {}", err);
        Self::Check(
            err.server_message()
                .unwrap_or(CHECK_FALLBACK_MESSAGE)
                .to_string(),
        )
    }

    /// Confirm failure carrying the server's message, or a generic one.
    /// An expired file token is reported by the server like any other error.
    pub fn confirm_failed(err: &ApiError) -> Self {
        log::warn!("Import confirm failed: {}", err);
        Self::Confirm(
            err.server_message()
                .unwrap_or(CONFIRM_FALLBACK_MESSAGE)
                .to_string(),
        )
    }
}
