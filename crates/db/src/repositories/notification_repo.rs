//! Repository for the `notifications` table.

use pawhome_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::notification::{NewNotification, Notification};

/// Column list for `notifications` queries.
const COLUMNS: &str =
    "id, user_id, report_id, kind, title, body, url, created_at, read, read_at";

/// Hard cap on stored notification titles, in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// Provides CRUD and read-state operations for notifications.
///
/// Rows are append-only from the core's point of view: they are created
/// by the dispatch rules and only their read state ever changes.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Persist a planned notification; rows always start unread.
    ///
    /// Titles longer than [`MAX_TITLE_CHARS`] are truncated rather than
    /// rejected. Rule templates stay far below the cap; this only guards
    /// free-form system notifications.
    pub async fn create(pool: &PgPool, new: &NewNotification) -> Result<Notification, sqlx::Error> {
        let title: String = if new.title.chars().count() > MAX_TITLE_CHARS {
            new.title.chars().take(MAX_TITLE_CHARS).collect()
        } else {
            new.title.clone()
        };

        let query = format!(
            "INSERT INTO notifications (user_id, report_id, kind, title, body, url) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(new.user_id)
            .bind(new.report_id)
            .bind(new.kind)
            .bind(&title)
            .bind(&new.body)
            .bind(&new.url)
            .fetch_one(pool)
            .await
    }

    /// Mark a single notification as read.
    ///
    /// Idempotent: an already-read notification keeps its original
    /// `read_at`. Returns `true` when the row actually changed.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET read = true, read_at = NOW() \
             WHERE id = $1 AND read = false",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a single notification as unread again, clearing `read_at`.
    ///
    /// Returns `true` when the row actually changed.
    pub async fn mark_unread(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET read = false, read_at = NULL \
             WHERE id = $1 AND read = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a set of notifications as read.
    ///
    /// Only currently-unread members are touched; returns how many rows
    /// actually changed.
    pub async fn bulk_mark_read(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET read = true, read_at = NOW() \
             WHERE id = ANY($1) AND read = false",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Mark a set of notifications as unread; returns how many rows
    /// actually changed.
    pub async fn bulk_mark_unread(pool: &PgPool, ids: &[DbId]) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET read = false, read_at = NULL \
             WHERE id = ANY($1) AND read = true",
        )
        .bind(ids)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Mark all of a user's unread notifications as read; returns the
    /// number marked.
    pub async fn mark_all_read(pool: &PgPool, user_id: UserId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET read = true, read_at = NOW() \
             WHERE user_id = $1 AND read = false",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// List notifications for a user, newest first.
    ///
    /// When `unread_only` is `true`, only unread notifications are
    /// returned.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let filter = if unread_only { "AND read = false" } else { "" };
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = $1 {filter} \
             ORDER BY created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Number of unread notifications for a user.
    pub async fn unread_count(pool: &PgPool, user_id: UserId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
