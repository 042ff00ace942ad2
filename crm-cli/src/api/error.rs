//! Errors returned by the CRM API client

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, TLS...)
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    /// The server answered 2xx but the body was not what we expected
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message as reported by the server, if the server reported one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            Self::Decode(_) => None,
        }
    }
}

/// Extract a human-readable message from an error response body.
///
/// Understands `{"detail": "..."}`, `{"detail": [{"msg": "..."}]}` (validation
/// errors), `{"message": "..."}`, `{"error": "..."}` and a bare JSON string;
/// any other non-empty text body is returned trimmed. Returns `None` for empty bodies.
pub fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(json) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    // A bare JSON string is the message itself
    if let Value::String(s) = &json {
        let s = s.trim();
        return (!s.is_empty()).then(|| s.to_string());
    }

    for key in ["detail", "message", "error"] {
        match json.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            Some(Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.as_str()),
                        other => other.get("msg").and_then(Value::as_str),
                    })
                    .collect();
                if !messages.is_empty() {
                    return Some(messages.join("; "));
                }
            }
            Some(Value::Object(obj)) => {
                if let Some(Value::String(s)) = obj.get("message") {
                    return Some(s.clone());
                }
            }
            _ => {}
        }
    }

    None
}
