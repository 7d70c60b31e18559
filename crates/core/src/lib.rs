//! PawHome domain core: shared types, write-time geographic validation,
//! and the great-circle distance calculator.
//!
//! This crate is persistence-free. Everything here is pure logic shared
//! by the database layer (`pawhome-db`) and the notification dispatch
//! engine (`pawhome-events`).

pub mod error;
pub mod geo;
pub mod location;
pub mod types;

pub use error::CoreError;
