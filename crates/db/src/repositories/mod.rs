//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod comment_repo;
pub mod notification_repo;
pub mod photo_repo;
pub mod preference_repo;
pub mod report_repo;
pub mod sighting_repo;
pub mod user_repo;

pub use comment_repo::CommentRepo;
pub use notification_repo::NotificationRepo;
pub use photo_repo::PhotoRepo;
pub use preference_repo::PreferenceRepo;
pub use report_repo::ReportRepo;
pub use sighting_repo::SightingRepo;
pub use user_repo::UserRepo;
