//! Database configuration loaded from environment variables.

use sqlx::postgres::PgPoolOptions;

use crate::DbPool;

/// Connection settings for the Postgres pool.
///
/// Defaults are suitable for local development; override via environment
/// variables in production.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Postgres connection URL (`DATABASE_URL`).
    pub database_url: String,
    /// Maximum pool connections (`DATABASE_MAX_CONNECTIONS`, default `20`).
    pub max_connections: u32,
}

impl DbConfig {
    /// Load configuration from environment variables, reading a `.env`
    /// file first when one is present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/pawhome".into());

        let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        Self {
            database_url,
            max_connections,
        }
    }

    /// Open a pool with these settings.
    pub async fn connect(&self) -> Result<DbPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.database_url)
            .await
    }
}
