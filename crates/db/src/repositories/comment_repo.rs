//! Repository for the `comments` table.

use pawhome_core::location;
use pawhome_core::types::ReportId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::comment::{Comment, CreateComment};

/// Column list for `comments` queries.
const COLUMNS: &str = "id, report_id, user_id, kind, body, lat, lon, created_at";

/// Provides CRUD operations for report comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment.
    ///
    /// The optional location must be a complete pair (both coordinates or
    /// neither), validated before the write.
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, DbError> {
        location::validate_optional_pair(input.lat, input.lon)?;

        let query = format!(
            "INSERT INTO comments (report_id, user_id, kind, body, lat, lon) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(input.report_id)
            .bind(input.user_id)
            .bind(input.kind)
            .bind(&input.body)
            .bind(input.lat)
            .bind(input.lon)
            .fetch_one(pool)
            .await?;
        Ok(comment)
    }

    /// List a report's comments in posting order.
    pub async fn list_for_report(
        pool: &PgPool,
        report_id: ReportId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments \
             WHERE report_id = $1 \
             ORDER BY created_at"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(report_id)
            .fetch_all(pool)
            .await
    }
}
