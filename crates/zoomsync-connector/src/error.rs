//! Error types for the Zoom connector.

use thiserror::Error;

/// Result type alias using `ZoomError`.
pub type ZoomResult<T> = Result<T, ZoomError>;

/// Errors that can occur when interacting with the Zoom API.
#[derive(Debug, Error)]
pub enum ZoomError {
    /// Configuration validation error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// OAuth token acquisition error.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Zoom API returned a non-success status.
    #[error("Zoom API error: {status} on {endpoint}: {message}")]
    Api {
        status: u16,
        endpoint: String,
        message: String,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl ZoomError {
    /// Upstream status code, if this error carries one.
    #[must_use]
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ZoomError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
