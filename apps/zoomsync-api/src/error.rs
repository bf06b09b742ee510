//! Error types for the HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use zoomsync_connector::ZoomError;

/// Error type for the synchronization API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Dummy-user count below 1.
    #[error("Count must be at least 1")]
    InvalidCount,

    /// Token acquisition failed.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The Zoom API answered a fetch with a non-success status.
    #[error("Upstream error: {status} on {endpoint}")]
    Upstream {
        status: u16,
        endpoint: String,
        message: String,
    },

    /// The Zoom API could not be reached or returned an unreadable response.
    #[error("Upstream unavailable: {0}")]
    Gateway(String),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<ZoomError> for ApiError {
    fn from(err: ZoomError) -> Self {
        match err {
            ZoomError::Auth(msg) => ApiError::Auth(msg),
            ZoomError::Api {
                status,
                endpoint,
                message,
            } => ApiError::Upstream {
                status,
                endpoint,
                message,
            },
            ZoomError::Http(e) => ApiError::Gateway(e.to_string()),
            ZoomError::Json(e) => ApiError::Gateway(format!("Invalid upstream response: {e}")),
            ZoomError::Config(msg) => ApiError::Internal(msg),
            ZoomError::Url(e) => ApiError::Internal(e.to_string()),
        }
    }
}

/// RFC 7807 Problem Details response format.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProblemDetails {
    fn new(problem_type: &str, title: &str, status: StatusCode, detail: String) -> Self {
        Self {
            problem_type: format!("https://zoomsync.dev/problems/{problem_type}"),
            title: title.to_string(),
            status: status.as_u16(),
            detail: Some(detail),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, problem) = match &self {
            ApiError::InvalidCount => (
                StatusCode::BAD_REQUEST,
                ProblemDetails::new(
                    "invalid-count",
                    "Invalid Count",
                    StatusCode::BAD_REQUEST,
                    "Count must be at least 1".to_string(),
                ),
            ),
            ApiError::Auth(msg) => {
                tracing::warn!("Token acquisition failed: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ProblemDetails::new(
                        "auth-failed",
                        "Authentication Failed",
                        StatusCode::BAD_REQUEST,
                        "Failed to acquire a Zoom access token".to_string(),
                    ),
                )
            }
            ApiError::Upstream {
                status,
                endpoint,
                message,
            } => {
                tracing::warn!(status = *status, endpoint = %endpoint, "Upstream fetch failed: {}", message);
                // Propagate the upstream status code to the caller.
                let status =
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
                (
                    status,
                    ProblemDetails::new(
                        "upstream-error",
                        "Upstream Error",
                        status,
                        format!("Zoom API request to {endpoint} failed: {message}"),
                    ),
                )
            }
            ApiError::Gateway(msg) => {
                tracing::error!("Upstream unavailable: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ProblemDetails::new(
                        "upstream-unavailable",
                        "Upstream Unavailable",
                        StatusCode::BAD_GATEWAY,
                        "The Zoom API could not be reached".to_string(),
                    ),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ProblemDetails::new(
                        "internal-error",
                        "Internal Server Error",
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    ),
                )
            }
        };

        (status, Json(problem)).into_response()
    }
}
