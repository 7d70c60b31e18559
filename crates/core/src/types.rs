/// Database primary keys are PostgreSQL BIGSERIAL unless noted otherwise.
pub type DbId = i64;

/// Users are keyed by BIGSERIAL.
pub type UserId = i64;

/// Reports carry opaque random UUID primary keys.
pub type ReportId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
