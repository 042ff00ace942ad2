//! Configuration data models

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_CHECK_PATH: &str = "/clienti/import/check";
pub const DEFAULT_CONFIRM_PATH: &str = "/clienti/import/confirm";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub import: ImportConfig,
}

/// Where the CRM API lives and how to authenticate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Bearer token sent with every request, if set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
        }
    }
}

impl ApiConfig {
    /// Token with everything but the last four characters hidden
    pub fn masked_token(&self) -> Option<String> {
        self.token.as_ref().map(|t| {
            let chars: Vec<char> = t.chars().collect();
            if chars.len() <= 4 {
                "*".repeat(chars.len())
            } else {
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("{}{}", "*".repeat(8), tail)
            }
        })
    }
}

/// Endpoint paths of the import flow, relative to `api.base_url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub check_path: String,
    pub confirm_path: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            check_path: DEFAULT_CHECK_PATH.to_string(),
            confirm_path: DEFAULT_CONFIRM_PATH.to_string(),
        }
    }
}
