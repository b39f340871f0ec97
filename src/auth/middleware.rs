// Auth gate for protected routes

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::auth::{error::AuthError, token::TokenIssuer};

/// Identity of the caller, established from a verified access token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

/// Validate the `Authorization: Bearer` header against the token issuer
///
/// Stateless: only the signing secret is consulted, never the store. Every
/// failure is `Unauthenticated`; the concrete reason is logged, not returned.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenIssuer) -> Result<AuthenticatedUser, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| {
            debug!("Missing Authorization header");
            AuthError::Unauthenticated
        })?
        .to_str()
        .map_err(|_| AuthError::Unauthenticated)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            debug!("Authorization header is not a Bearer token");
            AuthError::Unauthenticated
        })?;

    let claims = tokens.verify_access(token).map_err(|e| {
        debug!("Access token rejected: {}", e);
        AuthError::Unauthenticated
    })?;

    let user_id = claims.user_id().ok_or_else(|| {
        debug!("Access token subject is not a user id");
        AuthError::Unauthenticated
    })?;

    Ok(AuthenticatedUser { user_id })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<TokenIssuer>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Already verified by `require_auth` on this request
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(*user);
        }

        let tokens = Arc::<TokenIssuer>::from_ref(state);
        authenticate(&parts.headers, &tokens)
    }
}

/// Middleware that rejects unauthenticated requests before they reach a handler
///
/// On success the caller's identity rides along as a typed request extension.
pub async fn require_auth(
    State(tokens): State<Arc<TokenIssuer>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let user = authenticate(request.headers(), &tokens)?;
    debug!(
        "Authenticated user_id={} for {}",
        user.user_id,
        request.uri().path()
    );
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
