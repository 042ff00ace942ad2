//! HTTP client for the CRM REST API

use log::{debug, info};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::error::{ApiError, extract_error_message};
use super::models::{ColumnAnalysis, ConfirmRequest, ImportSummary};
use crate::config::Config;
use crate::import::file::SpreadsheetFile;

/// Client for the CRM REST API
#[derive(Debug, Clone)]
pub struct CrmClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    check_path: String,
    confirm_path: String,
}

impl CrmClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            token: config.api.token.clone().filter(|t| !t.is_empty()),
            check_path: config.import.check_path.clone(),
            confirm_path: config.import.confirm_path.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Upload a spreadsheet for column analysis
    pub async fn check_import(&self, file: &SpreadsheetFile) -> Result<ColumnAnalysis, ApiError> {
        let url = self.url(&self.check_path);
        info!("Uploading {} ({} bytes) for analysis", file.name, file.bytes.len());

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.upload_media_type())?;
        let form = Form::new().part("file", part);

        let response = self
            .authorize(self.http.post(&url).multipart(form))
            .send()
            .await?;

        let analysis: ColumnAnalysis = parse_response(response).await?;
        debug!(
            "Analysis: {} matched, {} unmatched, {} candidate fields",
            analysis.matched_columns.len(),
            analysis.unmatched_excel_columns.len(),
            analysis.all_db_columns.len()
        );
        Ok(analysis)
    }

    /// Import a previously analyzed file with the given column mapping
    pub async fn confirm_import(&self, request: &ConfirmRequest) -> Result<ImportSummary, ApiError> {
        let url = self.url(&self.confirm_path);
        info!(
            "Confirming import ({} mapped columns, extension {})",
            request.mapping.len(),
            request.file_extension
        );

        let response = self
            .authorize(self.http.post(&url).json(request))
            .send()
            .await?;

        parse_response(response).await
    }
}

/// Turn a response into either the decoded body or an `ApiError` carrying the
/// server's message
async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = extract_error_message(&body).unwrap_or_default();
        debug!("Server returned {}: {}", status, message);
        return Err(ApiError::Status { status, message });
    }

    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}
