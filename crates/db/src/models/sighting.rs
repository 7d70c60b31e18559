//! Sighting entity model and DTOs.

use pawhome_core::types::{DbId, ReportId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `sightings` table.
///
/// Every sighting references the report it concerns; the sighting
/// notification rule targets that report's owner.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sighting {
    pub id: DbId,
    pub report_id: ReportId,
    /// The user who logged the sighting.
    pub user_id: UserId,
    pub lat: f64,
    pub lon: f64,
    pub address: String,
    pub description: String,
    pub sighted_at: Timestamp,
    /// How confident the reporter is that the dog matches, 1 to 10.
    pub confidence: i32,
    pub reported_at: Timestamp,
    pub verified: bool,
}

/// DTO for creating a new sighting.
#[derive(Debug, Deserialize)]
pub struct CreateSighting {
    pub report_id: ReportId,
    pub user_id: UserId,
    pub lat: f64,
    pub lon: f64,
    pub address: String,
    pub description: String,
    pub sighted_at: Timestamp,
    pub confidence: i32,
}
