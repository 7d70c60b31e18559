//! Collaborator seams between the dispatch rules and the persistence
//! layer.
//!
//! The dispatcher only sees these traits. Production code wires in
//! [`PgStores`]; tests substitute in-memory fakes, so every rule is
//! exercised without a live database.

use async_trait::async_trait;
use pawhome_core::types::{DbId, ReportId, UserId};
use pawhome_db::models::notification::{NewNotification, Notification};
use pawhome_db::models::preference::Preference;
use pawhome_db::models::report::{Report, ReportStatus};
use pawhome_db::models::user::User;
use pawhome_db::repositories::{
    NotificationRepo, PhotoRepo, PreferenceRepo, ReportRepo, UserRepo,
};
use pawhome_db::DbPool;

/// Read access to per-user notification preferences.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Every preference with a configured home location, excluding the
    /// one owned by `exclude_user`. Deterministically ordered.
    async fn candidates_with_home_location(
        &self,
        exclude_user: UserId,
    ) -> Result<Vec<Preference>, sqlx::Error>;
}

/// Read access to reports.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn get(&self, id: ReportId) -> Result<Option<Report>, sqlx::Error>;

    /// The status currently on disk, regardless of any in-flight update.
    async fn persisted_status(&self, id: ReportId) -> Result<Option<ReportStatus>, sqlx::Error>;
}

/// Read access to users, for display names in message text.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: UserId) -> Result<Option<User>, sqlx::Error>;
}

/// Write access for notification rows.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn create(&self, new: &NewNotification) -> Result<Notification, sqlx::Error>;
}

/// Primary-photo bookkeeping for the photo-created rule.
#[async_trait]
pub trait PhotoStore: Send + Sync {
    async fn has_primary(&self, report_id: ReportId) -> Result<bool, sqlx::Error>;

    /// Atomically make `photo_id` the report's only primary photo.
    async fn set_primary(&self, report_id: ReportId, photo_id: DbId) -> Result<(), sqlx::Error>;
}

// ---------------------------------------------------------------------------
// Postgres-backed implementation
// ---------------------------------------------------------------------------

/// All collaborator traits backed by the Postgres repositories, sharing
/// one pool.
#[derive(Clone)]
pub struct PgStores {
    pool: DbPool,
}

impl PgStores {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceStore for PgStores {
    async fn candidates_with_home_location(
        &self,
        exclude_user: UserId,
    ) -> Result<Vec<Preference>, sqlx::Error> {
        PreferenceRepo::candidates_with_home_location(&self.pool, exclude_user).await
    }
}

#[async_trait]
impl ReportStore for PgStores {
    async fn get(&self, id: ReportId) -> Result<Option<Report>, sqlx::Error> {
        ReportRepo::get(&self.pool, id).await
    }

    async fn persisted_status(&self, id: ReportId) -> Result<Option<ReportStatus>, sqlx::Error> {
        ReportRepo::persisted_status(&self.pool, id).await
    }
}

#[async_trait]
impl UserStore for PgStores {
    async fn get(&self, id: UserId) -> Result<Option<User>, sqlx::Error> {
        UserRepo::get(&self.pool, id).await
    }
}

#[async_trait]
impl NotificationSink for PgStores {
    async fn create(&self, new: &NewNotification) -> Result<Notification, sqlx::Error> {
        NotificationRepo::create(&self.pool, new).await
    }
}

#[async_trait]
impl PhotoStore for PgStores {
    async fn has_primary(&self, report_id: ReportId) -> Result<bool, sqlx::Error> {
        PhotoRepo::has_primary(&self.pool, report_id).await
    }

    async fn set_primary(&self, report_id: ReportId, photo_id: DbId) -> Result<(), sqlx::Error> {
        PhotoRepo::set_primary(&self.pool, report_id, photo_id).await
    }
}
