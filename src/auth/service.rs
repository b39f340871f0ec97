// Session service - registration, login and the refresh token lifecycle

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    models::{LoginRequest, RegisterRequest, TokenPair, TokenState, UserResponse},
    password::PasswordService,
    repository::CredentialStore,
    token::TokenIssuer,
};
use crate::error::StoreError;
use crate::validation::format_validation_errors;

/// Session service coordinating all auth operations
///
/// Holds no mutable state of its own; everything durable lives in the store.
pub struct SessionService {
    store: Arc<dyn CredentialStore>,
    passwords: PasswordService,
    tokens: Arc<TokenIssuer>,
}

impl SessionService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        passwords: PasswordService,
        tokens: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            store,
            passwords,
            tokens,
        }
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterRequest) -> Result<UserResponse, AuthError> {
        request
            .validate()
            .map_err(|e| AuthError::Validation(format_validation_errors(&e)))?;

        let hash = self.passwords.hash_async(request.password).await?;

        let user = self
            .store
            .create_user(&request.username, &hash)
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation => AuthError::UsernameTaken,
                other => other.into(),
            })?;

        info!("Registered user {} ({})", user.id, user.username);
        Ok(user.into())
    }

    /// Login a user
    ///
    /// Unknown usernames still pay for a password verification, and both
    /// failure paths return the same error.
    pub async fn login(&self, request: LoginRequest) -> Result<TokenPair, AuthError> {
        request
            .validate()
            .map_err(|e| AuthError::Validation(format_validation_errors(&e)))?;

        let user = self.store.find_user_by_username(&request.username).await?;

        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let verified = self
            .passwords
            .verify_async(request.password, stored_hash)
            .await?;

        let user = match user {
            Some(user) if verified => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let access_token = self.tokens.issue_access(user.id)?;
        let (refresh_token, expires_at) = self.tokens.issue_refresh();
        self.store
            .insert_refresh_token(user.id, &refresh_token, expires_at)
            .await?;

        info!("User {} logged in", user.id);
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Mint a new access token from a live refresh token
    ///
    /// The refresh token itself is left as is; it stays valid until it
    /// expires or is revoked.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let stored = self
            .store
            .find_refresh_token(refresh_token)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        match stored.state(Utc::now()) {
            TokenState::Active => {}
            state => {
                debug!("Refresh token {} rejected in state {:?}", stored.id, state);
                return Err(AuthError::TokenExpiredOrRevoked);
            }
        }

        self.tokens.issue_access(stored.user_id)
    }

    /// Revoke a single refresh token (idempotent)
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.store.revoke_refresh_token(refresh_token).await?;
        debug!("Refresh token revoked");
        Ok(())
    }

    /// Revoke every refresh token the user owns (idempotent)
    pub async fn logout_all(&self, user_id: i64) -> Result<(), AuthError> {
        let revoked = self.store.revoke_all_refresh_tokens(user_id).await?;
        info!("Revoked {} refresh tokens for user {}", revoked, user_id);
        Ok(())
    }

    /// Get current user information
    pub async fn current_user(&self, user_id: i64) -> Result<UserResponse, AuthError> {
        self.store
            .find_user_by_id(user_id)
            .await?
            .map(UserResponse::from)
            .ok_or(AuthError::Unauthenticated)
    }
}
