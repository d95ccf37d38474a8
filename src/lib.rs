pub mod api;
pub mod auth;
pub mod cleanup;
pub mod cli;
pub mod db;
pub mod jwt;
pub mod service;

use api::create_api_router;
use axum::Router;
use db::Database;
use jwt::{JwtConfig, LifetimePolicy};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct ServerConfig {
    /// Database connection (cloneable, uses connection pool internally)
    pub db: Database,
    /// JWT secret for signing tokens
    pub jwt_secret: Vec<u8>,
    /// Issuer stamped into every token and required on verification
    pub jwt_issuer: String,
    /// Access, refresh and maximum token lifetimes
    pub token_lifetimes: LifetimePolicy,
}

/// Create the application router with the given configuration.
pub fn create_app(config: &ServerConfig) -> Router {
    let jwt = JwtConfig::new(&config.jwt_secret, config.jwt_issuer.clone())
        .with_policy(config.token_lifetimes);
    create_app_with_jwt(config.db.clone(), Arc::new(jwt))
}

/// Create the application router around an existing JWT configuration.
/// Lets callers supply their own clock or signing key.
pub fn create_app_with_jwt(db: Database, jwt: Arc<JwtConfig>) -> Router {
    Router::new().nest("/api", create_api_router(db, jwt))
}

/// Run cleanup tasks and spawn background scheduler.
/// Call this before starting the server.
pub async fn init_cleanup(db: &Database) {
    cleanup::run_cleanup(db).await;
    cleanup::spawn_cleanup_scheduler(db.clone());
}

/// Run the server on the given listener. This function blocks until the server exits.
/// Call `init_cleanup` before this to run cleanup on startup.
pub async fn run_server(config: ServerConfig, listener: TcpListener) -> Result<(), std::io::Error> {
    let app = create_app(&config);
    let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, make_service).await
}
