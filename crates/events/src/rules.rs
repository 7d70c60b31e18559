//! Per-event notification rules.
//!
//! Each function is a pure decision: given the triggering entity and the
//! data the dispatcher already fetched, produce the notification(s) to
//! write, or none. All filtering — distance, preference flags,
//! self-notification, status diffing — happens here.

use pawhome_core::geo;
use pawhome_db::models::comment::Comment;
use pawhome_db::models::notification::{NewNotification, NotificationKind};
use pawhome_db::models::preference::Preference;
use pawhome_db::models::report::{Report, ReportStatus};

/// Distance/preference decision for one candidate on a new report.
///
/// `None` when the candidate has no home location, lives outside their
/// configured radius, or opted out of this report kind. The radius
/// comparison is inclusive: a candidate at exactly `radius_km` is
/// notified.
pub fn new_report_notification(report: &Report, pref: &Preference) -> Option<NewNotification> {
    let (home_lat, home_lon) = pref.home_location()?;
    let distance = geo::distance_km(home_lat, home_lon, report.lat, report.lon);
    if distance > pref.radius_km || !pref.wants_kind(report.kind) {
        return None;
    }

    Some(NewNotification {
        user_id: pref.user_id,
        report_id: Some(report.id),
        kind: NotificationKind::NewReport,
        title: format!("New report: {}", report.kind.label()),
        body: format!(
            "A {} dog has been reported: {} in {}",
            report.kind.label(),
            report.dog_name,
            report.zone
        ),
        url: report.detail_url(),
    })
}

/// A sighting always notifies the sighted report's owner; no distance or
/// preference filtering applies.
pub fn sighting_notification(report: &Report) -> NewNotification {
    NewNotification {
        user_id: report.user_id,
        report_id: Some(report.id),
        kind: NotificationKind::Sighting,
        title: "New sighting reported".to_string(),
        body: format!("Someone reported a sighting of {}", report.dog_name),
        url: report.detail_url(),
    }
}

/// A comment notifies the report owner, unless they wrote it themselves.
pub fn comment_notification(
    comment: &Comment,
    report: &Report,
    author_name: &str,
) -> Option<NewNotification> {
    if comment.user_id == report.user_id {
        return None;
    }

    Some(NewNotification {
        user_id: report.user_id,
        report_id: Some(report.id),
        kind: NotificationKind::Comment,
        title: "New comment on your report".to_string(),
        body: format!(
            "{author_name} commented on the report for {}",
            report.dog_name
        ),
        url: report.detail_url(),
    })
}

/// Status-change decision: fires only when the incoming (in-memory)
/// status differs from the one currently persisted.
pub fn status_change_notification(
    report: &Report,
    persisted: ReportStatus,
) -> Option<NewNotification> {
    if report.status == persisted {
        return None;
    }

    Some(NewNotification {
        user_id: report.user_id,
        report_id: Some(report.id),
        kind: NotificationKind::StatusChanged,
        title: "Report status updated".to_string(),
        body: format!(
            "The status of your report for {} is now: {}",
            report.dog_name,
            report.status.label()
        ),
        url: report.detail_url(),
    })
}
