// Authentication module
// Argon2 credentials, short-lived JWT access tokens and stored, revocable refresh tokens

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

#[cfg(test)]
pub(crate) mod memory;

// Re-export commonly used types
pub use error::AuthError;
pub use middleware::{authenticate, require_auth, AuthenticatedUser};
pub use models::{LoginRequest, RefreshRequest, RegisterRequest, TokenPair, User, UserResponse};
pub use password::PasswordService;
pub use repository::{CredentialStore, PgCredentialStore};
pub use service::SessionService;
pub use token::{Claims, TokenError, TokenIssuer};
