//! The two server calls the import wizard depends on

use async_trait::async_trait;
use std::sync::Arc;

use crate::api::models::{ColumnAnalysis, ConfirmRequest, ImportSummary};
use crate::api::{ApiError, CrmClient};

use super::file::SpreadsheetFile;

/// Check and confirm endpoints, as seen by the wizard
#[async_trait]
pub trait ImportService: Send + Sync {
    /// Upload a file and get the server's column analysis
    async fn check(&self, file: &SpreadsheetFile) -> Result<ColumnAnalysis, ApiError>;

    /// Import a previously checked file with the final mapping
    async fn confirm(&self, request: &ConfirmRequest) -> Result<ImportSummary, ApiError>;
}

#[async_trait]
impl ImportService for CrmClient {
    async fn check(&self, file: &SpreadsheetFile) -> Result<ColumnAnalysis, ApiError> {
        self.check_import(file).await
    }

    async fn confirm(&self, request: &ConfirmRequest) -> Result<ImportSummary, ApiError> {
        self.confirm_import(request).await
    }
}

#[async_trait]
impl<T: ImportService + ?Sized> ImportService for Arc<T> {
    async fn check(&self, file: &SpreadsheetFile) -> Result<ColumnAnalysis, ApiError> {
        self.as_ref().check(file).await
    }

    async fn confirm(&self, request: &ConfirmRequest) -> Result<ImportSummary, ApiError> {
        self.as_ref().confirm(request).await
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted service for wizard tests

    use super::*;
    use reqwest::StatusCode;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeService {
        pub check_responses: Mutex<VecDeque<Result<ColumnAnalysis, String>>>,
        pub confirm_responses: Mutex<VecDeque<Result<ImportSummary, String>>>,
        pub checked_files: Mutex<Vec<String>>,
        pub confirm_requests: Mutex<Vec<ConfirmRequest>>,
    }

    impl FakeService {
        pub fn push_check(&self, response: Result<ColumnAnalysis, String>) {
            self.check_responses.lock().unwrap().push_back(response);
        }

        pub fn push_confirm(&self, response: Result<ImportSummary, String>) {
            self.confirm_responses.lock().unwrap().push_back(response);
        }

        pub fn check_calls(&self) -> usize {
            self.checked_files.lock().unwrap().len()
        }

        pub fn confirm_calls(&self) -> Vec<ConfirmRequest> {
            self.confirm_requests.lock().unwrap().clone()
        }
    }

    fn server_error(message: String) -> ApiError {
        ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    #[async_trait]
    impl ImportService for FakeService {
        async fn check(&self, file: &SpreadsheetFile) -> Result<ColumnAnalysis, ApiError> {
            self.checked_files.lock().unwrap().push(file.name.clone());
            self.check_responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected check call")
                .map_err(server_error)
        }

        async fn confirm(&self, request: &ConfirmRequest) -> Result<ImportSummary, ApiError> {
            self.confirm_requests.lock().unwrap().push(request.clone());
            self.confirm_responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected confirm call")
                .map_err(server_error)
        }
    }
}
