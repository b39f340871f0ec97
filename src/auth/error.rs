// Authentication and session error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::error::{ErrorResponse, StoreError};

/// Authentication, session and token errors
///
/// Each variant maps to a fixed status code and a client-safe message.
/// Persistence and crypto failures keep their detail for the server log only.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Request fields failed validation; message lists every failing field
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("username already exists")]
    UsernameTaken,

    /// Unknown username and wrong password are deliberately the same error
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Refresh token value is not known to the store
    #[error("invalid refresh token")]
    InvalidToken,

    #[error("refresh token expired or revoked")]
    TokenExpiredOrRevoked,

    /// Access token missing or rejected by the auth gate
    #[error("unauthenticated")]
    Unauthenticated,

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("password hashing error: {0}")]
    PasswordHash(String),

    #[error("token signing error: {0}")]
    Signing(String),
}

impl From<StoreError> for AuthError {
    fn from(error: StoreError) -> Self {
        AuthError::Persistence(error.to_string())
    }
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::UsernameTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::TokenExpiredOrRevoked
            | AuthError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthError::Persistence(_) | AuthError::PasswordHash(_) | AuthError::Signing(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message that is safe to send to clients (no internal detail)
    pub fn error_message(&self) -> String {
        match self {
            AuthError::Validation(msg) => format!("validation failed: {}", msg),
            AuthError::UsernameTaken => "username already exists".to_string(),
            AuthError::InvalidCredentials => "invalid credentials".to_string(),
            AuthError::InvalidToken => "invalid refresh token".to_string(),
            AuthError::TokenExpiredOrRevoked => "refresh token expired or revoked".to_string(),
            AuthError::Unauthenticated => "invalid token".to_string(),
            AuthError::Persistence(_) | AuthError::PasswordHash(_) | AuthError::Signing(_) => {
                "internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            AuthError::Validation(msg) => debug!("Auth validation error: {}", msg),
            AuthError::UsernameTaken => debug!("Registration rejected: username taken"),
            AuthError::InvalidCredentials => warn!("Failed login attempt"),
            AuthError::InvalidToken | AuthError::TokenExpiredOrRevoked => {
                warn!("Refresh rejected: {}", self)
            }
            AuthError::Unauthenticated => warn!("Unauthenticated request to protected resource"),
            AuthError::Persistence(_) | AuthError::PasswordHash(_) | AuthError::Signing(_) => {
                error!("Internal auth error: {}", self)
            }
        }

        ErrorResponse::new(self.error_message()).into_response_with(self.status_code())
    }
}
