use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::RepositoryError;

/// Every failure a handler can report. The body is always `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller sent something it can fix.
    #[error("{0}")]
    Validation(String),
    #[error("Todo {0} not found")]
    NotFound(i32),
    /// Carries only the message shown to the caller, the cause is logged.
    #[error("{0}")]
    Internal(&'static str),
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    /// Maps a store failure, logging anything that is not the caller's doing.
    pub fn from_repository(err: RepositoryError, message: &'static str) -> Self {
        match err {
            RepositoryError::NotFound(todo_id) => ApiError::NotFound(todo_id),
            err => {
                tracing::error!(error = %err, "{}", message);
                ApiError::Internal(message)
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
