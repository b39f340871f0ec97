// JWT access tokens and opaque refresh tokens

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::error::AuthError;

/// Default access token lifetime: 15 minutes
pub const ACCESS_TOKEN_TTL_SECS: i64 = 900;
/// Default refresh token lifetime: 7 days
pub const REFRESH_TOKEN_TTL_SECS: i64 = 604_800;

/// Random bytes behind each refresh token (hex encoded to 64 chars)
const REFRESH_TOKEN_BYTES: usize = 32;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String, // user_id, decimal
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    /// Numeric user id carried in `sub`
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Why an access token was rejected
///
/// Only ever logged; the auth gate collapses all of these into one response.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid signature or algorithm")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token or claims")]
    MalformedClaims,
}

/// Issues and verifies tokens with a shared HMAC secret
pub struct TokenIssuer {
    secret: String,
    access_token_ttl: i64,  // in seconds
    refresh_token_ttl: i64, // in seconds
}

impl TokenIssuer {
    /// Create an issuer with the default 15 minute / 7 day lifetimes
    pub fn new(secret: String) -> Self {
        Self::with_ttls(secret, ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS)
    }

    pub fn with_ttls(secret: String, access_token_ttl: i64, refresh_token_ttl: i64) -> Self {
        Self {
            secret,
            access_token_ttl,
            refresh_token_ttl,
        }
    }

    /// Mint a signed HS256 access token for `user_id`
    pub fn issue_access(&self, user_id: i64) -> Result<String, AuthError> {
        if self.secret.is_empty() {
            return Err(AuthError::Signing("signing secret is not configured".to_string()));
        }

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.access_token_ttl,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Generate a refresh token value and its expiry
    ///
    /// Uniqueness is left to the store's constraint; a collision fails the insert.
    pub fn issue_refresh(&self) -> (String, DateTime<Utc>) {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let expires_at = Utc::now() + Duration::seconds(self.refresh_token_ttl);
        (hex::encode(bytes), expires_at)
    }

    /// Validate an access token's algorithm, signature and expiry
    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenError> {
        // Only the HMAC family; anything else (RS*, ES*, none) is alg confusion.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                TokenError::InvalidSignature
            }
            _ => TokenError::MalformedClaims,
        })
        .and_then(|data| match data.claims.user_id() {
            Some(_) => Ok(data.claims),
            None => Err(TokenError::MalformedClaims),
        })
    }

    pub fn access_token_ttl(&self) -> i64 {
        self.access_token_ttl
    }
}
