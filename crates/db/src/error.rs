//! Persistence-layer error type.

use pawhome_core::CoreError;

/// Error returned by repository writes that validate their input.
///
/// Read-only repository methods have nothing to validate and surface
/// `sqlx::Error` directly, as do the notification write paths (their
/// input is produced by the dispatch rules, not by users).
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Input failed domain validation; nothing was written.
    #[error(transparent)]
    Validation(#[from] CoreError),

    /// The underlying query failed.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
