//! Client Import Wizard
//!
//! Wizard-style flow for importing clients from a spreadsheet:
//!
//! 1. Upload - pick a .xlsx/.xls/.csv file; the server analyzes its columns
//! 2. Mapping - decide a target field (or skip) for each unmatched column
//! 3. Result - imported row count and per-row warnings
//!
//! The wizard state machine (`app`) is pure; `dialog` runs it against an
//! `ImportService` and calls back into whoever opened it.

pub mod app;
pub mod command;
pub mod dialog;
pub mod error;
pub mod fields;
pub mod file;
pub mod msg;
pub mod preview;
pub mod report;
pub mod service;
pub mod state;

pub use app::ImportWizard;
pub use command::Command;
pub use dialog::{DialogHooks, ImportDialog};
pub use error::ImportError;
pub use file::{SpreadsheetFile, SpreadsheetFormat};
pub use msg::Msg;
pub use service::ImportService;
pub use state::{ImportOutcome, ImportStep, MappingState, State, StepKind, UploadState};
