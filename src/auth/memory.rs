// In-memory credential store for service and handler tests

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::models::{RefreshToken, User};
use crate::auth::repository::{hash_token, CredentialStore};
use crate::error::StoreError;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    refresh_tokens: Vec<RefreshToken>,
    next_user_id: i64,
    next_token_id: i64,
}

/// Mirrors the PostgreSQL constraints the session service relies on:
/// unique usernames and unique token digests.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    tables: Mutex<Tables>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every token a user owns
    pub fn tokens_for(&self, user_id: i64) -> Vec<RefreshToken> {
        let tables = self.tables.lock().unwrap();
        tables
            .refresh_tokens
            .iter()
            .filter(|rt| rt.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.username == username) {
            return Err(StoreError::UniqueViolation);
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_refresh_token(
        &self,
        user_id: i64,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let token_hash = hash_token(token);
        if tables.refresh_tokens.iter().any(|rt| rt.token_hash == token_hash) {
            return Err(StoreError::UniqueViolation);
        }

        tables.next_token_id += 1;
        let refresh_token = RefreshToken {
            id: tables.next_token_id,
            user_id,
            token_hash,
            expires_at,
            created_at: Utc::now(),
            revoked: false,
        };
        tables.refresh_tokens.push(refresh_token.clone());
        Ok(refresh_token)
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshToken>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let token_hash = hash_token(token);
        Ok(tables
            .refresh_tokens
            .iter()
            .find(|rt| rt.token_hash == token_hash)
            .cloned())
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let token_hash = hash_token(token);
        for rt in tables.refresh_tokens.iter_mut().filter(|rt| rt.token_hash == token_hash) {
            rt.revoked = true;
        }
        Ok(())
    }

    async fn revoke_all_refresh_tokens(&self, user_id: i64) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let mut touched = 0;
        for rt in tables.refresh_tokens.iter_mut().filter(|rt| rt.user_id == user_id) {
            rt.revoked = true;
            touched += 1;
        }
        Ok(touched)
    }
}

/// Store whose every call fails, for exercising the 500 path
pub struct FailingCredentialStore;

#[async_trait]
impl CredentialStore for FailingCredentialStore {
    async fn create_user(&self, _username: &str, _password_hash: &str) -> Result<User, StoreError> {
        Err(StoreError::Database("connection refused".to_string()))
    }

    async fn find_user_by_username(&self, _username: &str) -> Result<Option<User>, StoreError> {
        Err(StoreError::Database("connection refused".to_string()))
    }

    async fn find_user_by_id(&self, _id: i64) -> Result<Option<User>, StoreError> {
        Err(StoreError::Database("connection refused".to_string()))
    }

    async fn insert_refresh_token(
        &self,
        _user_id: i64,
        _token: &str,
        _expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, StoreError> {
        Err(StoreError::Database("connection refused".to_string()))
    }

    async fn find_refresh_token(&self, _token: &str) -> Result<Option<RefreshToken>, StoreError> {
        Err(StoreError::Database("connection refused".to_string()))
    }

    async fn revoke_refresh_token(&self, _token: &str) -> Result<(), StoreError> {
        Err(StoreError::Database("connection refused".to_string()))
    }

    async fn revoke_all_refresh_tokens(&self, _user_id: i64) -> Result<u64, StoreError> {
        Err(StoreError::Database("connection refused".to_string()))
    }
}
