// Password hashing and verification service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::auth::error::AuthError;

/// Password service for hashing and verification
///
/// Argon2id with configurable cost. Hashing and verification are CPU-bound;
/// async callers go through `hash_async` / `verify_async`, which run on the
/// blocking pool so they never stall the runtime or serialize other requests.
#[derive(Clone)]
pub struct PasswordService {
    params: Params,
    dummy_hash: String,
}

impl PasswordService {
    /// Create a service with the argon2 crate's default cost
    pub fn new() -> Result<Self, AuthError> {
        Self::with_params(Params::default())
    }

    /// Create a service with explicit cost parameters
    pub fn with_params(params: Params) -> Result<Self, AuthError> {
        let mut service = Self {
            params,
            dummy_hash: String::new(),
        };
        // Login against an unknown username verifies against this hash, so the
        // response takes as long as a wrong password would.
        let filler = hex::encode(rand::random::<[u8; 16]>());
        service.dummy_hash = service.hash(&filler)?;
        Ok(service)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a password using Argon2id with a random salt
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswordHash(e.to_string()))
    }

    /// Verify a password against a stored PHC hash
    ///
    /// A stored hash that does not parse is treated like a mismatch, after
    /// running the same verification work against the dummy hash.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self
                .argon2()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => {
                self.verify_dummy(password);
                false
            }
        }
    }

    /// Spend one verification's worth of work and discard the result
    pub fn verify_dummy(&self, password: &str) {
        if let Ok(parsed) = PasswordHash::new(&self.dummy_hash) {
            let _ = self.argon2().verify_password(password.as_bytes(), &parsed);
        }
    }

    /// Hash on the blocking thread pool
    pub async fn hash_async(&self, password: String) -> Result<String, AuthError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.hash(&password))
            .await
            .map_err(|e| AuthError::PasswordHash(format!("hash task failed: {}", e)))?
    }

    /// Verify on the blocking thread pool; `None` burns a dummy verification
    pub async fn verify_async(&self, password: String, hash: Option<String>) -> Result<bool, AuthError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || match hash {
            Some(hash) => service.verify(&password, &hash),
            None => {
                service.verify_dummy(&password);
                false
            }
        })
        .await
        .map_err(|e| AuthError::PasswordHash(format!("verify task failed: {}", e)))
    }
}

/// Cheap parameters so tests don't pay the production cost per hash
#[cfg(test)]
pub(crate) fn test_password_service() -> PasswordService {
    PasswordService::with_params(Params::new(256, 1, 1, None).unwrap()).unwrap()
}
