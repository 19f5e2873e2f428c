//! HTTP mapping for core errors.
//!
//! Validation rejections become `400 Bad Request` with the rejection text as a plain-text body.
//! Store failures become `500 Internal Server Error` with a fixed body; the detail is logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rx_core::PrescriptionError;

/// Body returned for malformed or absent submissions.
pub const INVALID_DATA_MESSAGE: &str = "Invalid data.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn invalid_data() -> Self {
        ApiError::BadRequest(INVALID_DATA_MESSAGE.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason).into_response(),
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<PrescriptionError> for ApiError {
    fn from(err: PrescriptionError) -> Self {
        if err.is_rejection() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::Internal(err.to_string())
        }
    }
}
