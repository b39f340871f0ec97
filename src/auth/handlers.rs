// HTTP handlers for authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use tracing::debug;
use validator::Validate;

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedUser,
    models::{AccessTokenResponse, LoginRequest, RefreshRequest, RegisterRequest, TokenPair, UserResponse},
};
use crate::error::MessageResponse;
use crate::extract::JsonBody;
use crate::validation::format_validation_errors;
use crate::AppState;

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AuthError> {
    debug!("Registering user: {}", request.username);
    let user = state.sessions.register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange credentials for an access/refresh token pair
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = TokenPair),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<TokenPair>, AuthError> {
    let pair = state.sessions.login(request).await?;
    Ok(Json(pair))
}

/// Mint a new access token from a refresh token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = AccessTokenResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unknown, expired or revoked refresh token")
    ),
    tag = "auth"
)]
pub async fn refresh_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RefreshRequest>,
) -> Result<Json<AccessTokenResponse>, AuthError> {
    validate_refresh_request(&request)?;
    let access_token = state.sessions.refresh(&request.refresh_token).await?;
    Ok(Json(AccessTokenResponse { access_token }))
}

/// Revoke one refresh token
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "Refresh token revoked", body = MessageResponse),
        (status = 400, description = "Invalid input")
    ),
    tag = "auth"
)]
pub async fn logout_handler(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RefreshRequest>,
) -> Result<Json<MessageResponse>, AuthError> {
    validate_refresh_request(&request)?;
    state.sessions.logout(&request.refresh_token).await?;
    Ok(Json(MessageResponse::new("logged out")))
}

/// Revoke every refresh token of the authenticated user
#[utoipa::path(
    post,
    path = "/api/auth/logout-all",
    responses(
        (status = 200, description = "All sessions revoked", body = MessageResponse),
        (status = 401, description = "Missing or invalid access token")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn logout_all_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<MessageResponse>, AuthError> {
    state.sessions.logout_all(user.user_id).await?;
    Ok(Json(MessageResponse::new("logged out from all sessions")))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Missing or invalid access token")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn me_handler(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<UserResponse>, AuthError> {
    let me = state.sessions.current_user(user.user_id).await?;
    Ok(Json(me))
}

fn validate_refresh_request(request: &RefreshRequest) -> Result<(), AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::Validation(format_validation_errors(&e)))
}
