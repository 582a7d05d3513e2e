//! Request-level errors and their HTTP mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::repository::RepositoryError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Every way a student request can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Field constraints violated. Raised before the repository is touched.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Body is not a decodable student.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("student not found")]
    NotFound,

    /// The repository refused a write.
    #[error("persistence fault")]
    Persistence(String),

    #[error("repository unavailable")]
    Unavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Persistence(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::EmptyResult | RepositoryError::NotFound(_) => ApiError::NotFound,
            RepositoryError::Persistence(msg) => ApiError::Persistence(msg),
            RepositoryError::Unavailable(msg) => ApiError::Unavailable(msg),
        }
    }
}

impl From<garde::Report> for ApiError {
    fn from(report: garde::Report) -> Self {
        ApiError::Validation(report.to_string().trim_end().to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

/// Body of client-correctable 400 responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) => {
                let body = ErrorResponse {
                    error: self.to_string(),
                    code: status.as_u16(),
                };
                (status, Json(body)).into_response()
            }
            // Storage details stay in the logs.
            _ => status.into_response(),
        }
    }
}
