//! Task API with session-based authentication.
//!
//! Users register and log in with a username/password, receive a short-lived
//! JWT access token plus a long-lived opaque refresh token, and use the access
//! token to reach the task endpoints.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod tasks;
pub mod validation;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use auth::{handlers as auth_handlers, require_auth, SessionService, TokenIssuer};
use tasks::{handlers as task_handlers, TaskService};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register_handler,
        auth::handlers::login_handler,
        auth::handlers::refresh_handler,
        auth::handlers::logout_handler,
        auth::handlers::logout_all_handler,
        auth::handlers::me_handler,
        tasks::handlers::create_task_handler,
        tasks::handlers::list_tasks_handler,
        tasks::handlers::get_task_handler,
        tasks::handlers::update_task_handler,
        tasks::handlers::delete_task_handler,
    ),
    components(schemas(
        auth::models::RegisterRequest,
        auth::models::LoginRequest,
        auth::models::RefreshRequest,
        auth::models::TokenPair,
        auth::models::AccessTokenResponse,
        auth::models::UserResponse,
        tasks::models::Task,
        tasks::models::CreateTaskRequest,
        tasks::models::UpdateTaskRequest,
        error::MessageResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and session management"),
        (name = "tasks", description = "Task management endpoints")
    ),
    info(
        title = "Task API",
        version = "0.1.0",
        description = "Task CRUD API with JWT access tokens and revocable refresh tokens"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionService>,
    pub tasks: Arc<TaskService>,
    pub tokens: Arc<TokenIssuer>,
}

impl FromRef<AppState> for Arc<TokenIssuer> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Creates and configures the application router
///
/// Everything under `protected` passes the auth gate first.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/api/auth/register", post(auth_handlers::register_handler))
        .route("/api/auth/login", post(auth_handlers::login_handler))
        .route("/api/auth/refresh", post(auth_handlers::refresh_handler))
        .route("/api/auth/logout", post(auth_handlers::logout_handler))
        .route("/health", get(health_handler));

    let protected = Router::new()
        .route("/api/auth/logout-all", post(auth_handlers::logout_all_handler))
        .route("/api/auth/me", get(auth_handlers::me_handler))
        .route(
            "/api/tasks",
            get(task_handlers::list_tasks_handler).post(task_handlers::create_task_handler),
        )
        .route(
            "/api/tasks/:id",
            get(task_handlers::get_task_handler)
                .put(task_handlers::update_task_handler)
                .delete(task_handlers::delete_task_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_auth,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
