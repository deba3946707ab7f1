//! # ApiError — the one failure shape callers see
//!
//! Every failed operation of [`crate::ApiClient`] funnels through
//! [`ApiError::from_cause`], which picks a user-presentable `message` and keeps the
//! underlying [`ErrorCause`] for callers that want to branch on it.
//!
//! | Cause | Produced by | Message |
//! |-------|-------------|---------|
//! | [`ErrorCause::Network`] | transport / connectivity failures | transport description |
//! | [`ErrorCause::Http`] | non-2xx responses | server-supplied message |
//! | [`ErrorCause::Validation`] | malformed local input, missing token | the validation message |
//! | [`ErrorCause::Decode`] | 2xx responses with an unexpected body | fallback |
//! | [`ErrorCause::Storage`] | session store writes | storage description |
//!
//! The message is never empty: whenever a cause carries nothing presentable it
//! falls back to [`SERVER_ERROR`]. Nothing is retried.

use serde_json::Value;
use store::StoreError;
use thiserror::Error;

/// Fallback message when a failure carries none of its own.
pub const SERVER_ERROR: &str = "Server error";

const MESSAGE_CHAR_LIMIT: usize = 160;

/// Underlying reason an API operation failed.
#[derive(Debug, Error)]
pub enum ErrorCause {
    #[error("network failure: {0}")]
    Network(String),
    #[error("HTTP status {status}")]
    Http { status: u16, message: Option<String> },
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Normalized failure of any API operation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    #[source]
    pub cause: ErrorCause,
}

impl ApiError {
    /// Normalize a cause into an error with a non-empty message.
    pub fn from_cause(cause: ErrorCause) -> Self {
        let message = match &cause {
            ErrorCause::Network(detail) | ErrorCause::Validation(detail) => detail.trim().to_string(),
            ErrorCause::Http { message, .. } => message.clone().unwrap_or_default(),
            ErrorCause::Decode(_) => String::new(),
            ErrorCause::Storage(e) => e.to_string(),
        };
        let message = if message.is_empty() {
            SERVER_ERROR.to_string()
        } else {
            message
        };
        Self { message, cause }
    }

    pub fn network(error: &reqwest::Error) -> Self {
        Self::from_cause(ErrorCause::Network(error.to_string()))
    }

    /// Build from a non-2xx status and the raw response body.
    pub fn http(status: u16, body: &str) -> Self {
        Self::from_cause(ErrorCause::Http {
            status,
            message: server_message(body),
        })
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::from_cause(ErrorCause::Validation(message.into()))
    }

    pub fn decode(error: &serde_json::Error) -> Self {
        Self::from_cause(ErrorCause::Decode(error.to_string()))
    }

    pub fn not_authenticated() -> Self {
        Self::validation("Not authenticated")
    }

    /// HTTP status of the failed response, if the failure was one.
    pub fn status(&self) -> Option<u16> {
        match self.cause {
            ErrorCause::Http { status, .. } => Some(status),
            _ => None,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        Self::from_cause(ErrorCause::Storage(error))
    }
}

/// Extract a presentable message from an error response body.
///
/// Understands `{"message": ..}`, `{"error": ..}`, `{"errors": [{"msg": ..}]}`, a bare
/// JSON string, and plain text.
fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let extracted = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => json_message(&value)?,
        Err(_) => trimmed.to_string(),
    };
    let compact = extracted.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.is_empty() {
        return None;
    }
    let preview = compact.chars().take(MESSAGE_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > MESSAGE_CHAR_LIMIT {
        Some(format!("{preview}..."))
    } else {
        Some(preview)
    }
}

fn json_message(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Object(fields) => ["message", "error"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str))
            .or_else(|| {
                fields
                    .get("errors")?
                    .as_array()?
                    .first()?
                    .get("msg")?
                    .as_str()
            })
            .map(str::to_string),
        _ => None,
    }
}
