//! PawHome persistence layer: sqlx/Postgres models and repositories.
//!
//! The SQL schema lives in `db/migrations/` at the workspace root.
//! Repositories are zero-sized structs providing async methods that take
//! `&PgPool` as their first argument. Writes that accept user input
//! validate it (coordinates, radius, location pairs) before touching the
//! database and return [`DbError`]; read-only methods surface
//! `sqlx::Error` directly.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;

pub use config::DbConfig;
pub use error::DbError;

use sqlx::postgres::PgPoolOptions;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Cheap connectivity probe.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
