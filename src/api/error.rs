//! API Client Error Types
//!
//! Errors raised while talking to the battle backend. The `Display` form
//! of every variant is written to be shown to the user as-is.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when calling the backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Backend answered with a non-success status
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        /// Parsed error body, if it was JSON
        payload: Option<Value>,
    },

    /// Connection could not be established
    #[error("Backend unreachable at {url}")]
    Unreachable { url: String },

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// Success status but the body did not match the expected shape
    #[error("Invalid response from backend: {0}")]
    Decode(String),
}

impl ClientError {
    /// Classify a transport error the way the rest of the crate expects
    pub(crate) fn from_transport(err: reqwest::Error, url: &str) -> Self {
        // A connect timeout reports both flags; it means unreachable
        if err.is_connect() {
            ClientError::Unreachable {
                url: url.to_string(),
            }
        } else if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Request(err)
        }
    }

    /// Build an HTTP error from a status and raw body
    pub(crate) fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let payload = serde_json::from_str::<Value>(body).ok();
        let message = payload
            .as_ref()
            .and_then(extract_message)
            .unwrap_or_else(|| {
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                )
            });

        ClientError::Http {
            status: status.as_u16(),
            message,
            payload,
        }
    }

    /// HTTP status, when the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the backend could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::Unreachable { .. })
    }
}

/// Pull a human-readable message out of an error body.
///
/// Checks `message`, then FastAPI's `detail` (string or validation list),
/// then `error` (string or `{message}` object).
pub fn extract_message(payload: &Value) -> Option<String> {
    if let Some(msg) = payload.get("message").and_then(Value::as_str) {
        return Some(msg.to_string());
    }

    match payload.get("detail") {
        Some(Value::String(detail)) => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            if let Some(msg) = items
                .first()
                .and_then(|item| item.get("msg"))
                .and_then(Value::as_str)
            {
                return Some(msg.to_string());
            }
        }
        _ => {}
    }

    match payload.get("error") {
        Some(Value::String(error)) => Some(error.clone()),
        Some(obj @ Value::Object(_)) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
