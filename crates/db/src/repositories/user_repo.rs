//! Repository for the `users` table.

use pawhome_core::location::DEFAULT_RADIUS_KM;
use pawhome_core::types::UserId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list for `users` queries.
const COLUMNS: &str = "id, username, email, display_name, created_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Create a user together with its default notification preference
    /// (5 km radius, all flags on, no home location).
    ///
    /// The two inserts share one transaction so a user can never exist
    /// without a preference row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (username, email, display_name) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.display_name)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO preferences (user_id, radius_km) VALUES ($1, $2)")
            .bind(user.id)
            .bind(DEFAULT_RADIUS_KM)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    /// Fetch a user by ID.
    pub async fn get(pool: &PgPool, id: UserId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
