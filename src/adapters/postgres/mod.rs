//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresExampleRepository` - Example aggregate persistence
//! - `connect_pool` - Pool construction from configuration

mod example_repository;

pub use example_repository::PostgresExampleRepository;

use crate::config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Build a connection pool from the database configuration.
///
/// # Errors
///
/// Returns the underlying `sqlx::Error` if the server is unreachable or
/// refuses the connection.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
}
