//! Repository for the `photos` table.

use pawhome_core::types::{DbId, ReportId};
use sqlx::PgPool;

use crate::models::photo::{CreatePhoto, Photo};

/// Column list for `photos` queries.
const COLUMNS: &str = "id, report_id, image_path, caption, is_primary, sort_order, uploaded_at";

/// Provides CRUD operations for report photos, including the
/// one-primary-per-report bookkeeping.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a photo row, never as primary.
    ///
    /// Promotion to primary goes through [`PhotoRepo::set_primary`] (the
    /// photo-created dispatch rule handles the first photo of a report).
    pub async fn create(pool: &PgPool, input: &CreatePhoto) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (report_id, image_path, caption, sort_order) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(input.report_id)
            .bind(&input.image_path)
            .bind(&input.caption)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Whether the report currently has a primary photo.
    pub async fn has_primary(pool: &PgPool, report_id: ReportId) -> Result<bool, sqlx::Error> {
        let found: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM photos WHERE report_id = $1 AND is_primary LIMIT 1")
                .bind(report_id)
                .fetch_optional(pool)
                .await?;
        Ok(found.is_some())
    }

    /// Make `photo_id` the report's primary photo.
    ///
    /// Unmarking the current primary and marking the new one share a
    /// transaction, so concurrent uploads cannot leave the report with
    /// zero or two primaries. A `photo_id` that does not belong to
    /// `report_id` fails with `RowNotFound` and rolls the unmark back.
    pub async fn set_primary(
        pool: &PgPool,
        report_id: ReportId,
        photo_id: DbId,
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE photos SET is_primary = false \
             WHERE report_id = $1 AND is_primary AND id <> $2",
        )
        .bind(report_id)
        .bind(photo_id)
        .execute(&mut *tx)
        .await?;

        let marked =
            sqlx::query("UPDATE photos SET is_primary = true WHERE id = $1 AND report_id = $2")
                .bind(photo_id)
                .bind(report_id)
                .execute(&mut *tx)
                .await?;
        if marked.rows_affected() != 1 {
            return Err(sqlx::Error::RowNotFound);
        }

        tx.commit().await?;
        Ok(())
    }

    /// List a report's photos in display order.
    pub async fn list_for_report(
        pool: &PgPool,
        report_id: ReportId,
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM photos \
             WHERE report_id = $1 \
             ORDER BY sort_order, uploaded_at"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(report_id)
            .fetch_all(pool)
            .await
    }
}
