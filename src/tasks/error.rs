use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

use crate::error::{ErrorResponse, StoreError};

/// Service-level errors for the tasks system
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("validation failed: {0}")]
    Validation(String),

    /// Ids are positive; zero or negative never reaches the store
    #[error("invalid task ID")]
    InvalidId,

    #[error("task not found")]
    NotFound,

    #[error("persistence error: {0}")]
    Persistence(String),
}

impl From<StoreError> for TaskError {
    fn from(error: StoreError) -> Self {
        TaskError::Persistence(error.to_string())
    }
}

impl TaskError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TaskError::Validation(_) | TaskError::InvalidId => StatusCode::BAD_REQUEST,
            TaskError::NotFound => StatusCode::NOT_FOUND,
            TaskError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let message = match &self {
            TaskError::Persistence(detail) => {
                error!("Task store error: {}", detail);
                "internal server error".to_string()
            }
            other => {
                debug!("Task request rejected: {}", other);
                other.to_string()
            }
        };

        ErrorResponse::new(message).into_response_with(self.status_code())
    }
}
