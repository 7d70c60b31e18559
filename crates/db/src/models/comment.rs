//! Comment entity model, enums, and DTOs.

use pawhome_core::types::{DbId, ReportId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// What a comment is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "comment_kind", rename_all = "lowercase")]
pub enum CommentKind {
    Sighting,
    Information,
    Update,
    Question,
    Other,
}

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub report_id: ReportId,
    pub user_id: UserId,
    pub kind: CommentKind,
    pub body: String,
    /// Optional location; set together with `lon` or not at all.
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub created_at: Timestamp,
}

impl Comment {
    /// Whether the comment carries a location (informal sightings do).
    pub fn has_location(&self) -> bool {
        self.lat.is_some() && self.lon.is_some()
    }
}

/// DTO for creating a new comment.
#[derive(Debug, Deserialize)]
pub struct CreateComment {
    pub report_id: ReportId,
    pub user_id: UserId,
    pub kind: CommentKind,
    pub body: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}
