//! Write-time validation for geographic and report fields.
//!
//! All range checks happen here, at the persistence boundary. The
//! distance calculator in [`crate::geo`] deliberately performs none.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Inclusive notification radius floor in kilometres.
pub const MIN_RADIUS_KM: f64 = 0.1;
/// Inclusive notification radius ceiling in kilometres.
pub const MAX_RADIUS_KM: f64 = 50.0;
/// Radius assigned to a freshly created preference.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// Lowest sighting confidence.
pub const MIN_CONFIDENCE: i32 = 1;
/// Highest sighting confidence.
pub const MAX_CONFIDENCE: i32 = 10;

/// Latitude must lie in [-90, 90].
pub fn validate_latitude(value: f64) -> Result<(), CoreError> {
    if (-90.0..=90.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidCoordinate {
            axis: "latitude",
            value,
        })
    }
}

/// Longitude must lie in [-180, 180].
pub fn validate_longitude(value: f64) -> Result<(), CoreError> {
    if (-180.0..=180.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidCoordinate {
            axis: "longitude",
            value,
        })
    }
}

/// Validate a required coordinate pair.
pub fn validate_point(lat: f64, lon: f64) -> Result<(), CoreError> {
    validate_latitude(lat)?;
    validate_longitude(lon)
}

/// Validate an optional coordinate pair: both set (and in range) or
/// neither.
pub fn validate_optional_pair(lat: Option<f64>, lon: Option<f64>) -> Result<(), CoreError> {
    match (lat, lon) {
        (None, None) => Ok(()),
        (Some(lat), Some(lon)) => validate_point(lat, lon),
        _ => Err(CoreError::InvalidLocationPair),
    }
}

/// Notification radius must lie in [[`MIN_RADIUS_KM`], [`MAX_RADIUS_KM`]].
pub fn validate_radius_km(value: f64) -> Result<(), CoreError> {
    if (MIN_RADIUS_KM..=MAX_RADIUS_KM).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidRadius(value))
    }
}

/// Sighting confidence must lie in [[`MIN_CONFIDENCE`], [`MAX_CONFIDENCE`]].
pub fn validate_confidence(value: i32) -> Result<(), CoreError> {
    if (MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::InvalidConfidence(value))
    }
}

/// The incident a report describes cannot postdate the report itself.
pub fn validate_incident_ordering(
    incident_at: Timestamp,
    reported_at: Timestamp,
) -> Result<(), CoreError> {
    if incident_at <= reported_at {
        Ok(())
    } else {
        Err(CoreError::IncidentAfterReport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn latitude_bounds_are_inclusive() {
        assert!(validate_latitude(-90.0).is_ok());
        assert!(validate_latitude(90.0).is_ok());
        assert!(validate_latitude(0.0).is_ok());
        assert!(validate_latitude(-90.0001).is_err());
        assert!(validate_latitude(90.0001).is_err());
        assert!(validate_latitude(f64::NAN).is_err());
    }

    #[test]
    fn longitude_bounds_are_inclusive() {
        assert!(validate_longitude(-180.0).is_ok());
        assert!(validate_longitude(180.0).is_ok());
        assert!(validate_longitude(-180.5).is_err());
        assert!(validate_longitude(180.5).is_err());
    }

    #[test]
    fn point_rejects_either_bad_axis() {
        assert!(validate_point(10.0, 20.0).is_ok());
        assert!(validate_point(91.0, 20.0).is_err());
        assert!(validate_point(10.0, 181.0).is_err());
    }

    #[test]
    fn optional_pair_requires_both_or_neither() {
        assert!(validate_optional_pair(None, None).is_ok());
        assert!(validate_optional_pair(Some(10.0), Some(20.0)).is_ok());

        let err = validate_optional_pair(Some(10.0), None).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLocationPair));
        let err = validate_optional_pair(None, Some(20.0)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLocationPair));
    }

    #[test]
    fn optional_pair_still_range_checks_values() {
        assert!(validate_optional_pair(Some(95.0), Some(20.0)).is_err());
    }

    #[test]
    fn radius_floor_and_ceiling_participate() {
        assert!(validate_radius_km(MIN_RADIUS_KM).is_ok());
        assert!(validate_radius_km(MAX_RADIUS_KM).is_ok());
        assert!(validate_radius_km(DEFAULT_RADIUS_KM).is_ok());
        assert!(validate_radius_km(0.0).is_err());
        assert!(validate_radius_km(50.01).is_err());
        assert!(validate_radius_km(f64::NAN).is_err());
    }

    #[test]
    fn confidence_bounds_are_inclusive() {
        assert!(validate_confidence(1).is_ok());
        assert!(validate_confidence(10).is_ok());
        assert!(validate_confidence(0).is_err());
        assert!(validate_confidence(11).is_err());
    }

    #[test]
    fn incident_must_not_postdate_report() {
        let now = Utc::now();
        assert!(validate_incident_ordering(now, now).is_ok());
        assert!(validate_incident_ordering(now - Duration::hours(2), now).is_ok());
        assert!(validate_incident_ordering(now + Duration::seconds(1), now).is_err());
    }
}
