/*
[INPUT]:  Error sources (transport, HTTP status, serialization, validation)
[OUTPUT]: Structured error type shared by the client and the view layer
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
[UPDATE]: 2026-10-12 Extract server `{"error": ...}` bodies into Api errors
*/

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Main error type for the taskdesk client
#[derive(Error, Debug)]
pub enum TaskdeskError {
    /// Transport-level failure (connect, DNS, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Input rejected before any request was sent
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl TaskdeskError {
    /// True for failures that never reached a server response
    pub fn is_transport(&self) -> bool {
        matches!(self, TaskdeskError::Http(_))
    }

    /// True for client-side input rejections
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskdeskError::Validation(_))
    }

    /// HTTP status of an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            TaskdeskError::Api { status, .. } => Some(*status),
            TaskdeskError::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        TaskdeskError::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    /// Build an API error from a non-success response body.
    ///
    /// The server reports failures as `{"error": "..."}`; anything else falls
    /// back to the raw body, then to the canonical status reason.
    pub fn from_response_body(status: StatusCode, body: &str) -> Self {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            return Self::api_error(status, parsed.error);
        }
        let trimmed = body.trim();
        if !trimmed.is_empty() {
            return Self::api_error(status, trimmed);
        }
        let reason = status.canonical_reason().unwrap_or("unknown status");
        Self::api_error(status, reason)
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        TaskdeskError::Validation(message.into())
    }
}

/// Result type alias for taskdesk operations
pub type Result<T> = std::result::Result<T, TaskdeskError>;
