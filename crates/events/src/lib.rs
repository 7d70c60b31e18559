//! Proximity-based notification dispatch for the PawHome platform.
//!
//! The persistence layer reports entity-lifecycle events to a
//! [`NotificationDispatcher`], which decides who gets notified and writes
//! notification rows through its injected collaborators:
//!
//! - the creation hooks ([`report_created`], [`sighting_created`],
//!   [`comment_created`], [`photo_created`]) run after the triggering row
//!   is durably committed, so a notification never references an
//!   uncommitted entity;
//! - [`report_updating`] runs before a report UPDATE commits, so it can
//!   compare the incoming status against the persisted one.
//!
//! Notification writes are best-effort: a failed insert is logged and
//! counted in the returned [`DispatchOutcome`], and never rolls back the
//! triggering entity's own commit.
//!
//! [`report_created`]: NotificationDispatcher::report_created
//! [`sighting_created`]: NotificationDispatcher::sighting_created
//! [`comment_created`]: NotificationDispatcher::comment_created
//! [`photo_created`]: NotificationDispatcher::photo_created
//! [`report_updating`]: NotificationDispatcher::report_updating

pub mod dispatcher;
pub mod rules;
pub mod stores;

pub use dispatcher::{DispatchError, DispatchOutcome, NotificationDispatcher};
pub use stores::{NotificationSink, PgStores, PhotoStore, PreferenceStore, ReportStore, UserStore};
