//! Report photo entity model and DTOs.

use pawhome_core::types::{DbId, ReportId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `photos` table.
///
/// At most one photo per report has `is_primary = true`; the invariant is
/// repaired by the photo-created dispatch rule and guarded by a partial
/// unique index.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub report_id: ReportId,
    pub image_path: String,
    pub caption: String,
    pub is_primary: bool,
    pub sort_order: i32,
    pub uploaded_at: Timestamp,
}

/// DTO for attaching a photo to a report.
#[derive(Debug, Deserialize)]
pub struct CreatePhoto {
    pub report_id: ReportId,
    pub image_path: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub sort_order: i32,
}
