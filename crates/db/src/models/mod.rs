//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for the fields callers supply on insert

pub mod comment;
pub mod notification;
pub mod photo;
pub mod preference;
pub mod report;
pub mod sighting;
pub mod user;
