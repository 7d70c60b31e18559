//! Repository for the `preferences` table.

use pawhome_core::location;
use pawhome_core::types::UserId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::preference::{Preference, UpdatePreference};

/// Column list for `preferences` queries.
const COLUMNS: &str = "id, user_id, email_enabled, push_enabled, radius_km, \
    home_lat, home_lon, notify_lost, notify_found, created_at, updated_at";

/// Provides read/update access to per-user notification settings.
///
/// Rows are created by [`UserRepo::create`](crate::repositories::UserRepo)
/// alongside the user, never here.
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Fetch the preference row for a user.
    pub async fn get_for_user(
        pool: &PgPool,
        user_id: UserId,
    ) -> Result<Option<Preference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM preferences WHERE user_id = $1");
        sqlx::query_as::<_, Preference>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace a user's preference settings.
    ///
    /// The radius and the optional home location pair are validated
    /// before anything is written. Returns the updated row, or `None`
    /// when the user has no preference row.
    pub async fn update(
        pool: &PgPool,
        user_id: UserId,
        input: &UpdatePreference,
    ) -> Result<Option<Preference>, DbError> {
        location::validate_radius_km(input.radius_km)?;
        location::validate_optional_pair(input.home_lat, input.home_lon)?;

        let query = format!(
            "UPDATE preferences SET \
                email_enabled = $2, push_enabled = $3, radius_km = $4, \
                home_lat = $5, home_lon = $6, notify_lost = $7, \
                notify_found = $8, updated_at = NOW() \
             WHERE user_id = $1 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Preference>(&query)
            .bind(user_id)
            .bind(input.email_enabled)
            .bind(input.push_enabled)
            .bind(input.radius_km)
            .bind(input.home_lat)
            .bind(input.home_lon)
            .bind(input.notify_lost)
            .bind(input.notify_found)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    /// List candidate recipients for distance-filtered notifications:
    /// every preference with a configured home location, except the one
    /// owned by `exclude_user`.
    ///
    /// Ordered by `user_id` so results are deterministic per run.
    pub async fn candidates_with_home_location(
        pool: &PgPool,
        exclude_user: UserId,
    ) -> Result<Vec<Preference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM preferences \
             WHERE home_lat IS NOT NULL AND home_lon IS NOT NULL \
               AND user_id <> $1 \
             ORDER BY user_id"
        );
        sqlx::query_as::<_, Preference>(&query)
            .bind(exclude_user)
            .fetch_all(pool)
            .await
    }
}
