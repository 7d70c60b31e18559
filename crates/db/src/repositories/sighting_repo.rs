//! Repository for the `sightings` table.

use pawhome_core::location;
use pawhome_core::types::{DbId, ReportId};
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::sighting::{CreateSighting, Sighting};

/// Column list for `sightings` queries.
const COLUMNS: &str = "id, report_id, user_id, lat, lon, address, description, \
    sighted_at, confidence, reported_at, verified";

/// Provides CRUD operations for sightings.
pub struct SightingRepo;

impl SightingRepo {
    /// Insert a new sighting.
    ///
    /// Coordinates and the confidence score are validated before the
    /// write.
    pub async fn create(pool: &PgPool, input: &CreateSighting) -> Result<Sighting, DbError> {
        location::validate_point(input.lat, input.lon)?;
        location::validate_confidence(input.confidence)?;

        let query = format!(
            "INSERT INTO sightings \
                (report_id, user_id, lat, lon, address, description, sighted_at, confidence) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let sighting = sqlx::query_as::<_, Sighting>(&query)
            .bind(input.report_id)
            .bind(input.user_id)
            .bind(input.lat)
            .bind(input.lon)
            .bind(&input.address)
            .bind(&input.description)
            .bind(input.sighted_at)
            .bind(input.confidence)
            .fetch_one(pool)
            .await?;
        Ok(sighting)
    }

    /// Fetch a sighting by ID.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<Sighting>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sightings WHERE id = $1");
        sqlx::query_as::<_, Sighting>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a report's sightings, most recent first.
    pub async fn list_for_report(
        pool: &PgPool,
        report_id: ReportId,
    ) -> Result<Vec<Sighting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sightings \
             WHERE report_id = $1 \
             ORDER BY sighted_at DESC"
        );
        sqlx::query_as::<_, Sighting>(&query)
            .bind(report_id)
            .fetch_all(pool)
            .await
    }
}
