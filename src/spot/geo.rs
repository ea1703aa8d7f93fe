// src/spot/geo.rs
//! Great-circle distance between spot endpoints

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle surface distance in kilometers between two points given as
/// (latitude, longitude) in degrees, using the haversine formula.
///
/// Total over all real inputs: identical points give 0, swapping the
/// endpoints gives the same result. Callers are expected to pass genuine
/// lat/lon values; out-of-range input yields a well-defined but
/// meaningless distance rather than an error.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points() {
        assert_eq!(haversine(42.438878, -71.119277, 42.438878, -71.119277), 0.0);
        assert_eq!(haversine(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let pairs = [
            (51.4775, -0.4614, 40.6413, -73.7781),
            (-33.9399, 18.6021, 35.6762, 139.6503),
            (89.0, 170.0, -89.0, -170.0),
        ];
        for (lat1, lon1, lat2, lon2) in pairs {
            let forward = haversine(lat1, lon1, lat2, lon2);
            let back = haversine(lat2, lon2, lat1, lon1);
            assert!((forward - back).abs() < 1e-9);
            assert!(forward >= 0.0);
        }
    }

    #[test]
    fn test_quarter_circle() {
        // Quarter of a great circle along the equator: R * pi / 2
        let d = haversine(0.0, 0.0, 0.0, 90.0);
        assert!((d - 10007.5).abs() < 0.1);
    }

    #[test]
    fn test_known_distance() {
        // Heathrow to JFK, roughly 5540 km
        let d = haversine(51.4775, -0.4614, 40.6413, -73.7781);
        assert!((d - 5540.0).abs() < 15.0);
    }

    #[test]
    fn test_antipodal() {
        // Half a great circle: R * pi
        let d = haversine(0.0, 0.0, 0.0, 180.0);
        assert!((d - 20015.0).abs() < 0.5);
    }
}
