//! PostgreSQL persistence for the Productivity Hub API.
//!
//! The pool is constructed once at startup, passed down explicitly through
//! application state, and closed on shutdown -- there is no module-level
//! singleton. All cross-request state lives in the database; per-statement
//! atomicity (`UPDATE`/`DELETE ... RETURNING`) is what concurrent requests
//! rely on.

pub mod models;
pub mod repositories;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Shared connection pool handle.
pub type DbPool = PgPool;

/// Connect to PostgreSQL and build the connection pool.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Cheap connectivity probe used by the health endpoint and at startup.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations embedded at compile time.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Drain in-flight work and close every connection in the pool.
pub async fn close_pool(pool: &DbPool) {
    pool.close().await;
}
