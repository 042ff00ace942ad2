//! Effects requested by the import wizard

use uuid::Uuid;

use crate::api::models::ConfirmRequest;

use super::file::SpreadsheetFile;
use super::state::ImportOutcome;

/// What the owner of the wizard should do after an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    /// Run the check call and report back with `Msg::CheckCompleted`
    Check { session: Uuid, file: SpreadsheetFile },
    /// Run the confirm call and report back with `Msg::ConfirmCompleted`
    Confirm {
        session: Uuid,
        request: ConfirmRequest,
    },
    /// The wizard was closed and its session discarded. `outcome` is set
    /// when the user closed it from the result step.
    Closed { outcome: Option<ImportOutcome> },
}
