//! # API Errors
//!
//! Error types for the HTTP surface. Every error renders as the same
//! envelope shape the success paths use.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::store::StoreError;

use super::envelope::Envelope;

/// Result type for handler operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Request body missing, unparsable, or not a JSON object
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// Path parameter failed to parse (non-integer id segment)
    #[error("invalid path parameter: {0}")]
    InvalidPath(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Envelope builder precondition broken: payload must be a JSON object.
    /// A programming error, never a normal request outcome.
    #[error("envelope payload must be a JSON object, got {0}")]
    ContractViolation(&'static str),

    /// Internal error (store lock poisoned)
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            ApiError::ContractViolation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidPath(rejection.body_text())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        Envelope::status(self.status_code(), self.to_string()).into_response()
    }
}
