//! # HTTP Errors
//!
//! Maps handler failures onto status codes. `NotFound` is answered with an
//! empty body; everything else is a 500 with a JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::Logger;
use crate::persona::RepoError;

/// Result type for persona handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Handler errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// No record with the requested id
    #[error("Persona not found")]
    NotFound,

    /// The store failed
    #[error("{0}")]
    Store(#[from] RepoError),

    /// The blocking task running a store call did not finish
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::NotFound = self {
            return status.into_response();
        }

        let message = self.to_string();
        Logger::error("PERSONA_REQUEST_FAILED", &[("error", message.as_str())]);

        let body = ErrorResponse {
            error: message,
            code: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}
