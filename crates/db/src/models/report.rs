//! Report entity model, enums, and DTOs.

use pawhome_core::types::{ReportId, Timestamp, UserId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Whether a report concerns a lost or a found dog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "report_kind", rename_all = "lowercase")]
pub enum ReportKind {
    Lost,
    Found,
}

impl ReportKind {
    /// Human-readable label used in notification text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Lost => "lost",
            Self::Found => "found",
        }
    }
}

/// Report lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "report_status", rename_all = "snake_case")]
pub enum ReportStatus {
    Active,
    InProgress,
    Closed,
}

impl ReportStatus {
    /// Human-readable label used in status-change notifications.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::InProgress => "in progress",
            Self::Closed => "closed",
        }
    }
}

/// A row from the `reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: ReportId,
    pub user_id: UserId,
    pub kind: ReportKind,
    pub status: ReportStatus,
    pub dog_name: String,
    pub color: String,
    pub description: String,
    pub distinguishing_features: String,
    pub lat: f64,
    pub lon: f64,
    pub address: String,
    /// Neighbourhood name, used in notification text.
    pub zone: String,
    pub reported_at: Timestamp,
    /// When the dog was lost/found; never later than `reported_at`.
    pub incident_at: Timestamp,
    pub updated_at: Timestamp,
    pub closed_at: Option<Timestamp>,
    pub contact_phone: String,
    pub contact_email: String,
    pub visible: bool,
    pub verified: bool,
}

impl Report {
    /// Canonical detail-page path, used as the notification link target.
    pub fn detail_url(&self) -> String {
        format!("/reports/{}/", self.id)
    }
}

/// DTO for creating a new report.
#[derive(Debug, Deserialize)]
pub struct CreateReport {
    pub user_id: UserId,
    pub kind: ReportKind,
    pub dog_name: String,
    pub color: String,
    pub description: String,
    #[serde(default)]
    pub distinguishing_features: String,
    pub lat: f64,
    pub lon: f64,
    pub address: String,
    pub zone: String,
    pub incident_at: Timestamp,
    pub contact_phone: String,
    pub contact_email: String,
}
