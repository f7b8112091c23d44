//! Mapping from service outcomes to HTTP responses.

use crate::task::services::{TaskServiceError, ValidationErrors};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Error returned by the REST handlers.
///
/// Storage details never reach the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was rejected before storage was touched.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// No task has the requested identifier.
    #[error("task not found")]
    NotFound,
    /// The store failed.
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Validation(errors) => Self::Validation(errors),
            TaskServiceError::NotFound(_) => Self::NotFound,
            TaskServiceError::Repository(cause) => {
                tracing::error!(error = %cause, "task storage failure");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(errors) => json!({ "errors": errors.violations() }),
            Self::NotFound => json!({ "error": "Task not found" }),
            Self::Internal => json!({ "error": "Internal server error" }),
        };
        (status, Json(body)).into_response()
    }
}
