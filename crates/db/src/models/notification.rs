//! Notification entity model and DTOs.

use pawhome_core::types::{DbId, ReportId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
pub enum NotificationKind {
    NewReport,
    Sighting,
    Comment,
    StatusChanged,
    System,
    Reminder,
}

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: UserId,
    /// `None` for system notifications with no related report.
    pub report_id: Option<ReportId>,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    /// Link target; empty when the notification has no destination.
    pub url: String,
    pub created_at: Timestamp,
    pub read: bool,
    /// Set exactly when `read` is true.
    pub read_at: Option<Timestamp>,
}

/// A notification about to be written. Rows always start unread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: UserId,
    pub report_id: Option<ReportId>,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub url: String,
}
