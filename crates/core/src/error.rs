//! Domain error taxonomy.

/// Validation and precondition failures raised at entity write time.
///
/// Geographic fields are validated where they are assigned (preference,
/// report, sighting, comment writes), never at notification time: by the
/// time a dispatch rule runs, every coordinate it reads is already valid.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Latitude or longitude outside its valid range.
    #[error("coordinate out of range: {axis} = {value}")]
    InvalidCoordinate { axis: &'static str, value: f64 },

    /// One half of a latitude/longitude pair set without the other.
    #[error("latitude and longitude must be set together or not at all")]
    InvalidLocationPair,

    /// Notification radius outside the allowed range.
    #[error("notification radius out of range: {0} km")]
    InvalidRadius(f64),

    /// Sighting confidence outside [1, 10].
    #[error("confidence out of range: {0}")]
    InvalidConfidence(i32),

    /// A report's incident time is later than the report time itself.
    #[error("incident time must not be later than the report time")]
    IncidentAfterReport,
}
