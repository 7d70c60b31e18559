//! Entity-lifecycle dispatch: fans events out to notification writes.

use std::sync::Arc;

use pawhome_core::types::ReportId;
use pawhome_db::models::comment::Comment;
use pawhome_db::models::notification::NewNotification;
use pawhome_db::models::photo::Photo;
use pawhome_db::models::report::Report;
use pawhome_db::models::sighting::Sighting;
use pawhome_db::DbPool;

use crate::rules;
use crate::stores::{
    NotificationSink, PgStores, PhotoStore, PreferenceStore, ReportStore, UserStore,
};

/// Fallback author name when a commenter row cannot be resolved.
const ANONYMOUS_AUTHOR: &str = "Someone";

/// What a dispatch call produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Notifications durably written.
    pub created: usize,
    /// Notifications that failed to persist and were dropped (logged).
    pub failed: usize,
}

/// Errors that abort a dispatch call.
///
/// Failing to persist an individual notification is *not* an error here:
/// that path is best-effort and only reflected in
/// [`DispatchOutcome::failed`].
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A candidate, report, or user lookup failed.
    #[error("store query failed: {0}")]
    Store(#[from] sqlx::Error),

    /// A sighting or comment references a report that does not exist.
    /// Should never happen while the schema enforces referential
    /// integrity.
    #[error("dangling report reference: {0}")]
    MissingAssociation(ReportId),
}

/// Decides recipients for each entity-lifecycle event and writes the
/// resulting notifications through the injected collaborators.
///
/// Creation hooks must be invoked after the triggering row is committed;
/// [`report_updating`](Self::report_updating) must be invoked before the
/// report UPDATE commits.
pub struct NotificationDispatcher {
    preferences: Arc<dyn PreferenceStore>,
    reports: Arc<dyn ReportStore>,
    users: Arc<dyn UserStore>,
    photos: Arc<dyn PhotoStore>,
    sink: Arc<dyn NotificationSink>,
}

impl NotificationDispatcher {
    /// Wire a dispatcher from explicit collaborators.
    pub fn new(
        preferences: Arc<dyn PreferenceStore>,
        reports: Arc<dyn ReportStore>,
        users: Arc<dyn UserStore>,
        photos: Arc<dyn PhotoStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            preferences,
            reports,
            users,
            photos,
            sink,
        }
    }

    /// Wire every collaborator to the Postgres repositories on one pool.
    pub fn postgres(pool: DbPool) -> Self {
        let stores = Arc::new(PgStores::new(pool));
        Self::new(
            stores.clone(),
            stores.clone(),
            stores.clone(),
            stores.clone(),
            stores,
        )
    }

    /// New-report rule: notify every candidate with a home location
    /// within their radius who opted into this report kind. The report's
    /// own author is excluded at the store query.
    pub async fn report_created(&self, report: &Report) -> Result<DispatchOutcome, DispatchError> {
        let candidates = self
            .preferences
            .candidates_with_home_location(report.user_id)
            .await?;

        let mut outcome = DispatchOutcome::default();
        for pref in &candidates {
            if let Some(new) = rules::new_report_notification(report, pref) {
                self.write(new, &mut outcome).await;
            }
        }

        tracing::debug!(
            report_id = %report.id,
            candidates = candidates.len(),
            created = outcome.created,
            "Dispatched new-report notifications"
        );
        Ok(outcome)
    }

    /// Status-change rule. Must run before the report UPDATE commits: it
    /// compares the in-memory `report.status` against the persisted row.
    /// A report not persisted yet (first creation) is a no-op.
    pub async fn report_updating(&self, report: &Report) -> Result<DispatchOutcome, DispatchError> {
        let mut outcome = DispatchOutcome::default();
        let Some(persisted) = self.reports.persisted_status(report.id).await? else {
            return Ok(outcome);
        };

        if let Some(new) = rules::status_change_notification(report, persisted) {
            self.write(new, &mut outcome).await;
        }
        Ok(outcome)
    }

    /// Sighting rule: exactly one notification to the sighted report's
    /// owner.
    pub async fn sighting_created(
        &self,
        sighting: &Sighting,
    ) -> Result<DispatchOutcome, DispatchError> {
        let report = self
            .reports
            .get(sighting.report_id)
            .await?
            .ok_or(DispatchError::MissingAssociation(sighting.report_id))?;

        let mut outcome = DispatchOutcome::default();
        self.write(rules::sighting_notification(&report), &mut outcome)
            .await;
        Ok(outcome)
    }

    /// Comment rule: notify the report owner unless they authored the
    /// comment themselves.
    pub async fn comment_created(
        &self,
        comment: &Comment,
    ) -> Result<DispatchOutcome, DispatchError> {
        let report = self
            .reports
            .get(comment.report_id)
            .await?
            .ok_or(DispatchError::MissingAssociation(comment.report_id))?;

        let author = self.users.get(comment.user_id).await?;
        let author_name = author.as_ref().map(|u| u.name()).unwrap_or(ANONYMOUS_AUTHOR);

        let mut outcome = DispatchOutcome::default();
        if let Some(new) = rules::comment_notification(comment, &report, author_name) {
            self.write(new, &mut outcome).await;
        }
        Ok(outcome)
    }

    /// Photo-primary repair rule: the first photo of a report becomes its
    /// primary. Produces no notification.
    pub async fn photo_created(&self, photo: &Photo) -> Result<(), DispatchError> {
        if self.photos.has_primary(photo.report_id).await? {
            return Ok(());
        }
        self.photos.set_primary(photo.report_id, photo.id).await?;
        Ok(())
    }

    /// Best-effort notification write: failures are logged and counted,
    /// never propagated.
    async fn write(&self, new: NewNotification, outcome: &mut DispatchOutcome) {
        match self.sink.create(&new).await {
            Ok(_) => outcome.created += 1,
            Err(e) => {
                outcome.failed += 1;
                tracing::warn!(
                    error = %e,
                    user_id = new.user_id,
                    kind = ?new.kind,
                    "Failed to persist notification"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::Utc;
    use pawhome_core::types::{DbId, UserId};
    use pawhome_db::models::comment::CommentKind;
    use pawhome_db::models::notification::{Notification, NotificationKind};
    use pawhome_db::models::preference::Preference;
    use pawhome_db::models::report::{ReportKind, ReportStatus};
    use pawhome_db::models::user::User;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// In-memory stand-in for every collaborator trait.
    #[derive(Default)]
    struct FakeStores {
        preferences: Vec<Preference>,
        reports: Vec<Report>,
        users: Vec<User>,
        /// Reports that already have a primary photo.
        primaries: HashSet<ReportId>,
        /// Photos promoted via `set_primary`.
        promotions: Mutex<Vec<(ReportId, DbId)>>,
        /// Notifications accepted by the sink.
        written: Mutex<Vec<NewNotification>>,
        /// When set, the sink rejects every write.
        fail_sink: bool,
    }

    #[async_trait]
    impl PreferenceStore for FakeStores {
        async fn candidates_with_home_location(
            &self,
            exclude_user: UserId,
        ) -> Result<Vec<Preference>, sqlx::Error> {
            Ok(self
                .preferences
                .iter()
                .filter(|p| p.home_location().is_some() && p.user_id != exclude_user)
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl ReportStore for FakeStores {
        async fn get(&self, id: ReportId) -> Result<Option<Report>, sqlx::Error> {
            Ok(self.reports.iter().find(|r| r.id == id).cloned())
        }

        async fn persisted_status(
            &self,
            id: ReportId,
        ) -> Result<Option<ReportStatus>, sqlx::Error> {
            Ok(self.reports.iter().find(|r| r.id == id).map(|r| r.status))
        }
    }

    #[async_trait]
    impl UserStore for FakeStores {
        async fn get(&self, id: UserId) -> Result<Option<User>, sqlx::Error> {
            Ok(self.users.iter().find(|u| u.id == id).cloned())
        }
    }

    #[async_trait]
    impl NotificationSink for FakeStores {
        async fn create(&self, new: &NewNotification) -> Result<Notification, sqlx::Error> {
            if self.fail_sink {
                return Err(sqlx::Error::PoolClosed);
            }
            let mut written = self.written.lock().unwrap();
            written.push(new.clone());
            Ok(Notification {
                id: written.len() as DbId,
                user_id: new.user_id,
                report_id: new.report_id,
                kind: new.kind,
                title: new.title.clone(),
                body: new.body.clone(),
                url: new.url.clone(),
                created_at: Utc::now(),
                read: false,
                read_at: None,
            })
        }
    }

    #[async_trait]
    impl PhotoStore for FakeStores {
        async fn has_primary(&self, report_id: ReportId) -> Result<bool, sqlx::Error> {
            Ok(self.primaries.contains(&report_id))
        }

        async fn set_primary(
            &self,
            report_id: ReportId,
            photo_id: DbId,
        ) -> Result<(), sqlx::Error> {
            self.promotions.lock().unwrap().push((report_id, photo_id));
            Ok(())
        }
    }

    fn dispatcher(stores: FakeStores) -> (NotificationDispatcher, Arc<FakeStores>) {
        let stores = Arc::new(stores);
        let d = NotificationDispatcher::new(
            stores.clone(),
            stores.clone(),
            stores.clone(),
            stores.clone(),
            stores.clone(),
        );
        (d, stores)
    }

    fn report(owner: UserId, lat: f64, lon: f64, kind: ReportKind) -> Report {
        let now = Utc::now();
        Report {
            id: Uuid::new_v4(),
            user_id: owner,
            kind,
            status: ReportStatus::Active,
            dog_name: "Luna".into(),
            color: "black".into(),
            description: "Black labrador".into(),
            distinguishing_features: String::new(),
            lat,
            lon,
            address: "456 Oak Ave".into(),
            zone: "Norte".into(),
            reported_at: now,
            incident_at: now,
            updated_at: now,
            closed_at: None,
            contact_phone: "555-0101".into(),
            contact_email: "luna@example.com".into(),
            visible: true,
            verified: false,
        }
    }

    fn pref(user_id: UserId, home: Option<(f64, f64)>, radius_km: f64) -> Preference {
        let now = Utc::now();
        Preference {
            id: user_id,
            user_id,
            email_enabled: true,
            push_enabled: true,
            radius_km,
            home_lat: home.map(|(lat, _)| lat),
            home_lon: home.map(|(_, lon)| lon),
            notify_lost: true,
            notify_found: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn user(id: UserId, username: &str, display_name: Option<&str>) -> User {
        User {
            id,
            username: username.into(),
            email: format!("{username}@example.com"),
            display_name: display_name.map(Into::into),
            created_at: Utc::now(),
        }
    }

    fn sighting_of(report: &Report, by: UserId) -> Sighting {
        let now = Utc::now();
        Sighting {
            id: 1,
            report_id: report.id,
            user_id: by,
            lat: report.lat,
            lon: report.lon,
            address: "near the park".into(),
            description: "Saw a dog like this one".into(),
            sighted_at: now,
            confidence: 7,
            reported_at: now,
            verified: false,
        }
    }

    fn comment_on(report: &Report, by: UserId) -> Comment {
        Comment {
            id: 1,
            report_id: report.id,
            user_id: by,
            kind: CommentKind::Information,
            body: "Any updates?".into(),
            lat: None,
            lon: None,
            created_at: Utc::now(),
        }
    }

    fn photo_of(report: &Report, id: DbId) -> Photo {
        Photo {
            id,
            report_id: report.id,
            image_path: format!("reports/{}/photos/{id}.jpg", report.id),
            caption: String::new(),
            is_primary: false,
            sort_order: 0,
            uploaded_at: Utc::now(),
        }
    }

    // -- new report --

    #[tokio::test]
    async fn nearby_candidate_gets_exactly_one_notification() {
        let report = report(1, 0.0, 0.0, ReportKind::Lost);
        let (d, stores) = dispatcher(FakeStores {
            preferences: vec![pref(2, Some((0.0, 0.01)), 5.0)],
            ..Default::default()
        });

        let outcome = d.report_created(&report).await.unwrap();
        assert_eq!(outcome, DispatchOutcome { created: 1, failed: 0 });

        let written = stores.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].user_id, 2);
        assert_eq!(written[0].kind, NotificationKind::NewReport);
    }

    #[tokio::test]
    async fn candidate_with_small_radius_gets_nothing() {
        let report = report(1, 0.0, 0.0, ReportKind::Lost);
        let (d, stores) = dispatcher(FakeStores {
            preferences: vec![pref(2, Some((0.0, 0.01)), 1.0)],
            ..Default::default()
        });

        let outcome = d.report_created(&report).await.unwrap();
        assert_eq!(outcome.created, 0);
        assert!(stores.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn report_author_is_never_notified() {
        let report = report(1, 0.0, 0.0, ReportKind::Lost);
        let (d, stores) = dispatcher(FakeStores {
            // The author's own preference sits right on top of the report.
            preferences: vec![pref(1, Some((0.0, 0.0)), 50.0)],
            ..Default::default()
        });

        let outcome = d.report_created(&report).await.unwrap();
        assert_eq!(outcome.created, 0);
        assert!(stores.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn mixed_candidates_filter_independently() {
        let report = report(1, 0.0, 0.0, ReportKind::Found);
        let mut opted_out = pref(4, Some((0.0, 0.01)), 5.0);
        opted_out.notify_found = false;
        let (d, stores) = dispatcher(FakeStores {
            preferences: vec![
                pref(2, Some((0.0, 0.01)), 5.0),  // in range
                pref(3, Some((0.0, 0.5)), 5.0),   // ~56 km away
                opted_out,                        // in range but opted out
                pref(5, None, 50.0),              // no home location
            ],
            ..Default::default()
        });

        let outcome = d.report_created(&report).await.unwrap();
        assert_eq!(outcome.created, 1);
        assert_eq!(stores.written.lock().unwrap()[0].user_id, 2);
    }

    #[tokio::test]
    async fn sink_failure_is_counted_not_fatal() {
        let report = report(1, 0.0, 0.0, ReportKind::Lost);
        let (d, stores) = dispatcher(FakeStores {
            preferences: vec![pref(2, Some((0.0, 0.01)), 5.0)],
            fail_sink: true,
            ..Default::default()
        });

        let outcome = d.report_created(&report).await.unwrap();
        assert_eq!(outcome, DispatchOutcome { created: 0, failed: 1 });
        assert!(stores.written.lock().unwrap().is_empty());
    }

    // -- sighting --

    #[tokio::test]
    async fn sighting_notifies_report_owner() {
        let report = report(1, 10.0, 20.0, ReportKind::Lost);
        let sighting = sighting_of(&report, 9);
        let (d, stores) = dispatcher(FakeStores {
            reports: vec![report],
            ..Default::default()
        });

        let outcome = d.sighting_created(&sighting).await.unwrap();
        assert_eq!(outcome.created, 1);

        let written = stores.written.lock().unwrap();
        assert_eq!(written[0].user_id, 1);
        assert_eq!(written[0].kind, NotificationKind::Sighting);
    }

    #[tokio::test]
    async fn sighting_with_dangling_report_is_fatal() {
        let orphan_report = report(1, 10.0, 20.0, ReportKind::Lost);
        let sighting = sighting_of(&orphan_report, 9);
        let (d, _) = dispatcher(FakeStores::default());

        let err = d.sighting_created(&sighting).await.unwrap_err();
        assert_matches!(err, DispatchError::MissingAssociation(id) if id == orphan_report.id);
    }

    // -- comment --

    #[tokio::test]
    async fn comment_by_owner_creates_nothing() {
        let report = report(1, 10.0, 20.0, ReportKind::Lost);
        let comment = comment_on(&report, 1);
        let (d, stores) = dispatcher(FakeStores {
            reports: vec![report],
            users: vec![user(1, "owner", None)],
            ..Default::default()
        });

        let outcome = d.comment_created(&comment).await.unwrap();
        assert_eq!(outcome.created, 0);
        assert!(stores.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn comment_by_other_user_creates_exactly_one() {
        let report = report(1, 10.0, 20.0, ReportKind::Lost);
        let comment = comment_on(&report, 7);
        let (d, stores) = dispatcher(FakeStores {
            reports: vec![report],
            users: vec![user(7, "ana", Some("Ana García"))],
            ..Default::default()
        });

        let outcome = d.comment_created(&comment).await.unwrap();
        assert_eq!(outcome.created, 1);

        let written = stores.written.lock().unwrap();
        assert_eq!(written[0].user_id, 1);
        assert_eq!(written[0].kind, NotificationKind::Comment);
        assert!(written[0].body.starts_with("Ana García commented"));
    }

    #[tokio::test]
    async fn missing_comment_author_falls_back_to_generic_name() {
        let report = report(1, 10.0, 20.0, ReportKind::Lost);
        let comment = comment_on(&report, 7);
        let (d, stores) = dispatcher(FakeStores {
            reports: vec![report],
            ..Default::default()
        });

        d.comment_created(&comment).await.unwrap();
        let written = stores.written.lock().unwrap();
        assert!(written[0].body.starts_with("Someone commented"));
    }

    // -- status change --

    #[tokio::test]
    async fn status_change_notifies_owner_once() {
        let persisted = report(1, 10.0, 20.0, ReportKind::Lost);
        let mut updated = persisted.clone();
        updated.status = ReportStatus::Closed;
        let (d, stores) = dispatcher(FakeStores {
            reports: vec![persisted],
            ..Default::default()
        });

        let outcome = d.report_updating(&updated).await.unwrap();
        assert_eq!(outcome.created, 1);

        let written = stores.written.lock().unwrap();
        assert_eq!(written[0].kind, NotificationKind::StatusChanged);
        assert_eq!(written[0].user_id, 1);
    }

    #[tokio::test]
    async fn saving_with_unchanged_status_is_silent() {
        let persisted = report(1, 10.0, 20.0, ReportKind::Lost);
        let updated = persisted.clone();
        let (d, stores) = dispatcher(FakeStores {
            reports: vec![persisted],
            ..Default::default()
        });

        let outcome = d.report_updating(&updated).await.unwrap();
        assert_eq!(outcome.created, 0);
        assert!(stores.written.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn brand_new_report_never_triggers_status_rule() {
        let fresh = report(1, 10.0, 20.0, ReportKind::Lost);
        let (d, stores) = dispatcher(FakeStores::default());

        let outcome = d.report_updating(&fresh).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::default());
        assert!(stores.written.lock().unwrap().is_empty());
    }

    // -- photo primary --

    #[tokio::test]
    async fn first_photo_is_promoted_to_primary() {
        let report = report(1, 10.0, 20.0, ReportKind::Lost);
        let photo = photo_of(&report, 11);
        let (d, stores) = dispatcher(FakeStores::default());

        d.photo_created(&photo).await.unwrap();
        assert_eq!(
            *stores.promotions.lock().unwrap(),
            vec![(report.id, 11)]
        );
    }

    #[tokio::test]
    async fn later_photo_leaves_existing_primary_alone() {
        let report = report(1, 10.0, 20.0, ReportKind::Lost);
        let photo = photo_of(&report, 12);
        let mut primaries = HashSet::new();
        primaries.insert(report.id);
        let (d, stores) = dispatcher(FakeStores {
            primaries,
            ..Default::default()
        });

        d.photo_created(&photo).await.unwrap();
        assert!(stores.promotions.lock().unwrap().is_empty());
    }
}
