//! API error types with JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use noteshare_store::AccessError;
use serde::Serialize;

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Error from the access-controlled note store.
    #[error(transparent)]
    Notes(#[from] AccessError),
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Notes(e) => match e {
                AccessError::InvalidRequest(_) => "BAD_REQUEST",
                AccessError::NotFound(_) => "NOT_FOUND",
                AccessError::Unauthorized { .. } => "FORBIDDEN",
                AccessError::StoreFailure(_) if e.is_timeout() => "STORE_TIMEOUT",
                AccessError::StoreFailure(_) => "STORAGE_ERROR",
            },
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Notes(e) => match e {
                AccessError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                AccessError::NotFound(_) => StatusCode::NOT_FOUND,
                AccessError::Unauthorized { .. } => StatusCode::FORBIDDEN,
                AccessError::StoreFailure(_) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
                AccessError::StoreFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error details.
    pub error: ErrorDetails,
}

/// Error details within the response.
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    /// Error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
