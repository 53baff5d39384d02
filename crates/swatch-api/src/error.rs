//! Error types for swatch-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Result type alias for swatch-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in swatch-api
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from swatch-core
    #[error("Core error: {0}")]
    Core(#[from] swatch_core::Error),

    /// Error from swatch-storage
    #[error("Storage error: {0}")]
    Storage(#[from] swatch_storage::Error),

    /// Error from swatch-session
    #[error("Session error: {0}")]
    Session(#[from] swatch_session::Error),

    /// Listener or socket failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error returned from a request handler.
///
/// Client mistakes become `400 Bad Request`; everything else is logged and
/// answered with a bare `500`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request carried something unusable, such as a malformed id.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A store or other server-side failure.
    #[error(transparent)]
    Internal(#[from] Error),
}

impl From<swatch_core::Error> for ApiError {
    fn from(e: swatch_core::Error) -> Self {
        if e.is_client_error() {
            ApiError::BadRequest(e.to_string())
        } else {
            ApiError::Internal(e.into())
        }
    }
}

impl From<swatch_storage::Error> for ApiError {
    fn from(e: swatch_storage::Error) -> Self {
        ApiError::Internal(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                tracing::debug!(%message, "Rejected request");
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
