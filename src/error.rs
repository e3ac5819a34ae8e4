use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application error taxonomy.
///
/// Collisions during code generation are deliberately absent: they are retried
/// internally and only surface as [`AppError::CodeSpaceExhausted`] once the
/// bounded retry loop runs dry.
#[derive(Debug)]
pub enum AppError {
    /// Client submitted a malformed or unsupported URL. Not retryable.
    InvalidUrl { message: String, details: Value },
    /// No mapping exists for the requested short code.
    NotFound { message: String, details: Value },
    /// Could not reserve a free code within the bounded retry loop.
    CodeSpaceExhausted { message: String, details: Value },
    /// The backing store failed. Safe for the caller to retry.
    StorageUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn code_space_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CodeSpaceExhausted {
            message: message.into(),
            details,
        }
    }
    pub fn storage_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
            details,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            AppError::InvalidUrl { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::CodeSpaceExhausted { message, .. }
            | AppError::StorageUnavailable { message, .. } => message,
        };
        write!(f, "{}", message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::InvalidUrl { message, details } => {
                (StatusCode::BAD_REQUEST, "invalid_url", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::CodeSpaceExhausted { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "code_space_exhausted",
                message,
                details,
            ),
            AppError::StorageUnavailable { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_unavailable",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::storage_unavailable("Storage backend error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::invalid_url(
            "Request validation failed",
            serde_json::to_value(&e).unwrap_or_else(|_| json!({})),
        )
    }
}
