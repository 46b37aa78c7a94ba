//! Error types for the movie proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == App Error Enum ==
/// Unified error type for data access and the proxy server.
#[derive(Error, Debug)]
pub enum AppError {
    /// The requested record does not exist upstream
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport failure talking to the provider or the proxy
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Upstream body could not be decoded into the expected shape
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The owning view went away before the response arrived
    #[error("Request cancelled")]
    Cancelled,

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// True when the error means "this record is absent" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

// == Conversions ==
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Network(_) | AppError::Upstream { .. } | AppError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, AppError>;
