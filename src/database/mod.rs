pub mod models;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::config;

/// Open the connection pool using the pool sizing from config.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let database = &config::config().database;

    PgPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(Duration::from_secs(database.connection_timeout))
        .connect(database_url)
        .await
}
