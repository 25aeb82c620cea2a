use crate::models::responses::ErrorResponse;
use crate::models::storage::StorageError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;
use thiserror::Error;
use tracing::error;

/// The catalog operation a storage failure interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Operation::Read => "reading books",
            Operation::Create => "creating book",
            Operation::Delete => "deleting book",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid id: {0}")]
    InvalidIdentifier(String),
    #[error("{0}")]
    Validation(String),
    #[error("A book with the same title and year already exists")]
    Conflict,
    #[error("Book not found")]
    NotFound,
    #[error("Error {operation}")]
    StorageFailure {
        operation: Operation,
        #[source]
        source: StorageError,
    },
}

impl ApiError {
    pub fn storage(operation: Operation) -> impl FnOnce(StorageError) -> ApiError {
        move |source| ApiError::StorageFailure { operation, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidIdentifier(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::StorageFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::StorageFailure { operation, source } = &self {
            error!("Storage failure while {}: {}", operation, source);
        }

        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
