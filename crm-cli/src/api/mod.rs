//! CRM REST API client
//!
//! Thin typed wrapper over the endpoints the CLI talks to. Only the client
//! import endpoints are covered for now.

pub mod client;
pub mod error;
pub mod models;

pub use client::CrmClient;
pub use error::ApiError;
pub use models::{ColumnAnalysis, ConfirmRequest, ImportSummary, MatchedColumn};
