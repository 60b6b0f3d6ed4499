//! Error types for treematch-server
//!
//! Handlers return `ApiResult<T>`; every error renders as
//! `{"error": {"code": ..., "message": ...}}` with a matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// treematch-common error (database, config)
    #[error("Common error: {0}")]
    Common(#[from] treematch_common::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Common(treematch_common::Error::Database(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Common(ref err) => common_status(err),
        };

        if status.is_server_error() {
            tracing::error!(code = error_code, "{}", message);
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

fn common_status(err: &treematch_common::Error) -> (StatusCode, &'static str, String) {
    if err.is_foreign_key_violation() {
        (
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            "Soil property or location reference is invalid or still in use".to_string(),
        )
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR", err.to_string())
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
