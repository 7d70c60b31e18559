//! Notification preference entity model and DTOs.

use pawhome_core::types::{DbId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::report::ReportKind;

/// A row from the `preferences` table; exactly one per user, created
/// together with the user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Preference {
    pub id: DbId,
    pub user_id: UserId,
    pub email_enabled: bool,
    pub push_enabled: bool,
    /// Notification radius in kilometres, within [0.1, 50.0].
    pub radius_km: f64,
    /// Home latitude; set together with `home_lon` or not at all.
    pub home_lat: Option<f64>,
    /// Home longitude; set together with `home_lat` or not at all.
    pub home_lon: Option<f64>,
    pub notify_lost: bool,
    pub notify_found: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Preference {
    /// The configured home location, when both coordinates are set.
    pub fn home_location(&self) -> Option<(f64, f64)> {
        match (self.home_lat, self.home_lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Whether the user opted into notifications for this report kind.
    pub fn wants_kind(&self, kind: ReportKind) -> bool {
        match kind {
            ReportKind::Lost => self.notify_lost,
            ReportKind::Found => self.notify_found,
        }
    }
}

/// DTO for replacing a user's preference settings.
#[derive(Debug, Deserialize)]
pub struct UpdatePreference {
    pub email_enabled: bool,
    pub push_enabled: bool,
    pub radius_km: f64,
    pub home_lat: Option<f64>,
    pub home_lon: Option<f64>,
    pub notify_lost: bool,
    pub notify_found: bool,
}
