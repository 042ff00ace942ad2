//! CRM command-line client
//!
//! Talks to the CRM REST API. The main workflow is the client import wizard
//! in [`import`]: upload a spreadsheet, map its columns, import.

pub mod api;
pub mod cli;
pub mod config;
pub mod import;
