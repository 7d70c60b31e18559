//! Repository for the `reports` table.

use pawhome_core::location;
use pawhome_core::types::ReportId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::report::{CreateReport, Report, ReportStatus};

/// Column list for `reports` queries.
const COLUMNS: &str = "id, user_id, kind, status, dog_name, color, description, \
    distinguishing_features, lat, lon, address, zone, reported_at, incident_at, \
    updated_at, closed_at, contact_phone, contact_email, visible, verified";

/// Provides CRUD operations for reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a new report under a fresh random ID.
    ///
    /// Coordinates are validated here, at the write boundary, and the
    /// incident time must not be later than the report time. Status,
    /// visibility and verification flags start at their defaults.
    pub async fn create(pool: &PgPool, input: &CreateReport) -> Result<Report, DbError> {
        location::validate_point(input.lat, input.lon)?;
        let reported_at = chrono::Utc::now();
        location::validate_incident_ordering(input.incident_at, reported_at)?;

        let query = format!(
            "INSERT INTO reports \
                (id, user_id, kind, dog_name, color, description, \
                 distinguishing_features, lat, lon, address, zone, reported_at, \
                 incident_at, contact_phone, contact_email) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COLUMNS}"
        );
        let report = sqlx::query_as::<_, Report>(&query)
            .bind(Uuid::new_v4())
            .bind(input.user_id)
            .bind(input.kind)
            .bind(&input.dog_name)
            .bind(&input.color)
            .bind(&input.description)
            .bind(&input.distinguishing_features)
            .bind(input.lat)
            .bind(input.lon)
            .bind(&input.address)
            .bind(&input.zone)
            .bind(reported_at)
            .bind(input.incident_at)
            .bind(&input.contact_phone)
            .bind(&input.contact_email)
            .fetch_one(pool)
            .await?;
        Ok(report)
    }

    /// Fetch a report by ID.
    pub async fn get(pool: &PgPool, id: ReportId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Read only the currently persisted status for a report.
    ///
    /// The status-change rule compares an in-memory update against this
    /// value before the UPDATE commits.
    pub async fn persisted_status(
        pool: &PgPool,
        id: ReportId,
    ) -> Result<Option<ReportStatus>, sqlx::Error> {
        sqlx::query_scalar("SELECT status FROM reports WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move a report to a new status.
    ///
    /// Closing stamps `closed_at`; any other status clears it. Returns
    /// the updated row, or `None` when the report does not exist.
    pub async fn update_status(
        pool: &PgPool,
        id: ReportId,
        status: ReportStatus,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET \
                status = $2, \
                closed_at = CASE WHEN $2 = 'closed'::report_status THEN NOW() END, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Moderator action: toggle public visibility. Returns `true` when a
    /// row changed.
    pub async fn set_visible(
        pool: &PgPool,
        id: ReportId,
        visible: bool,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE reports SET visible = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(visible)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Moderator action: mark a report as verified (or revoke it).
    pub async fn set_verified(
        pool: &PgPool,
        id: ReportId,
        verified: bool,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE reports SET verified = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(verified)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
