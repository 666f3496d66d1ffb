use std::sync::Arc;

use auth_api_rust::config;
use auth_api_rust::database;
use auth_api_rust::routes::{app, AppState};
use auth_api_rust::services::memory::MemoryUserService;
use auth_api_rust::services::postgres::PostgresUserService;
use auth_api_rust::services::UserService;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Auth API in {:?} mode", config.environment);

    let users: Arc<dyn UserService> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = database::connect(&url)
                .await
                .unwrap_or_else(|e| panic!("failed to connect to database: {}", e));
            Arc::new(PostgresUserService::new(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using in-memory user store");
            Arc::new(MemoryUserService::new())
        }
    };

    let app = app(AppState::new(users));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Auth API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
