//! HTTP error mapper
//!
//! Every failure surfaces as one of four fixed JSON envelopes:
//! `{"success": false, "error": <status>, "message": <fixed text>}`.
//! Details never leak into the envelope; they go to the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for route handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API failure taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Malformed or missing required input
    #[error("Bad Request")]
    BadRequest,

    /// No matching rows, or unknown route
    #[error("Not found")]
    NotFound,

    /// Input is well-formed but violates referential integrity
    #[error("Unprocessable Content")]
    Unprocessable,

    /// Any other failure, including store errors
    #[error("Internal Server Error")]
    Internal,
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed envelope message for this error
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::BadRequest => "Bad Request",
            ApiError::NotFound => "Not found",
            ApiError::Unprocessable => "Unprocessable Content",
            ApiError::Internal => "Internal Server Error",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "store operation failed");
        ApiError::Internal
    }
}
