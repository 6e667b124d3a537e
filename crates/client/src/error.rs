//! Client error types

use thiserror::Error;

/// Errors surfaced by the TaskGrid client
///
/// The `Display` output is meant to be shown to the user as-is.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Server rejected the credentials (HTTP 401)
    #[error("{0}")]
    Unauthorized(String),

    /// Server returned a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Input rejected before any request was sent
    #[error("{0}")]
    Validation(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Browser storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Build the error for a non-success status from the response body
    ///
    /// The message is taken from the body's `error` field, then its `message`
    /// field, and falls back to `HTTP <status>`.
    pub fn from_response(status: reqwest::StatusCode, body: &[u8]) -> Self {
        let message = server_message(body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        match status.as_u16() {
            401 => Self::Unauthorized(message),
            status => Self::Api { status, message },
        }
    }

    /// Whether the session is gone and the user has to log in again
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized(_) => Some(401),
            Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn server_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|field| value.get(field)?.as_str().filter(|s| !s.is_empty()))
        .map(str::to_owned)
}
