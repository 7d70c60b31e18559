//! Great-circle distance between two coordinates.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two lat/lon points (degrees).
///
/// Inputs are assumed already validated to lie in [-90, 90] / [-180, 180];
/// range checks live in [`crate::location`] at the write boundary. The
/// radicand is clamped to [0, 1] so floating rounding near identical or
/// antipodal points can never produce a NaN or a negative distance.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();

    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Half of Earth's circumference, the largest possible great-circle
    /// distance.
    const HALF_CIRCUMFERENCE_KM: f64 = std::f64::consts::PI * EARTH_RADIUS_KM;

    #[test]
    fn identical_points_have_zero_distance() {
        assert_eq!(distance_km(0.0, 0.0, 0.0, 0.0), 0.0);
        assert!(distance_km(48.8566, 2.3522, 48.8566, 2.3522).abs() < 1e-9);
        assert!(distance_km(-90.0, 0.0, -90.0, 0.0).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let forward = distance_km(40.4168, -3.7038, 19.4326, -99.1332);
        let backward = distance_km(19.4326, -99.1332, 40.4168, -3.7038);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn distance_is_never_negative_and_bounded() {
        let samples = [
            (0.0, 0.0, 0.0, 180.0),
            (90.0, 0.0, -90.0, 0.0),
            (12.34, 56.78, -12.34, -123.22),
            (89.999, 179.999, -89.999, -179.999),
        ];
        for (lat1, lon1, lat2, lon2) in samples {
            let d = distance_km(lat1, lon1, lat2, lon2);
            assert!(d >= 0.0, "negative distance for {lat1},{lon1} -> {lat2},{lon2}");
            assert!(
                d <= HALF_CIRCUMFERENCE_KM + 1e-6,
                "distance {d} exceeds half circumference"
            );
        }
    }

    #[test]
    fn antipodal_points_reach_half_circumference() {
        let d = distance_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - HALF_CIRCUMFERENCE_KM).abs() < 1e-6);

        let poles = distance_km(90.0, 0.0, -90.0, 0.0);
        assert!((poles - HALF_CIRCUMFERENCE_KM).abs() < 1e-6);
    }

    #[test]
    fn one_hundredth_degree_of_longitude_at_equator() {
        // 0.01 degrees of longitude at the equator is roughly 1.112 km,
        // the reference point used by the new-report radius tests.
        let d = distance_km(0.0, 0.0, 0.0, 0.01);
        assert!((d - 1.1119).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn nearby_points_produce_small_positive_distance() {
        // ~1.1 m apart; must be tiny but strictly positive.
        let d = distance_km(48.8566, 2.3522, 48.85661, 2.3522);
        assert!(d > 0.0);
        assert!(d < 0.01);
    }
}
