use std::sync::Arc;

use task_api::{
    auth::{PasswordService, PgCredentialStore, SessionService, TokenIssuer},
    config::AppConfig,
    create_router, db,
    tasks::{PgTaskRepository, TaskService},
    AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // RUST_LOG wins; otherwise info for everything
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Task API - Starting...");

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url, config.database_max_connections).await?;
    db::run_migrations(&pool).await?;

    let tokens = Arc::new(TokenIssuer::with_ttls(
        config.jwt_secret.clone(),
        config.access_token_ttl_secs,
        config.refresh_token_ttl_secs,
    ));
    let sessions = Arc::new(SessionService::new(
        Arc::new(PgCredentialStore::new(pool.clone())),
        PasswordService::new()?,
        tokens.clone(),
    ));
    let tasks = Arc::new(TaskService::new(Arc::new(PgTaskRepository::new(pool))));

    let app = create_router(AppState {
        sessions,
        tasks,
        tokens,
    });

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Task API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
