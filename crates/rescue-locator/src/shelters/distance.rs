use super::domain::{Coordinate, LocatorError};

/// Mean Earth radius used for all shelter distances.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance in miles between two validated coordinates (haversine).
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude() - a.latitude()).to_radians();
    let d_lng = (b.longitude() - a.longitude()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude().to_radians().cos()
            * b.latitude().to_radians().cos()
            * (d_lng / 2.0).sin().powi(2);

    // Rounding can push h a hair outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_MILES * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Distance from raw degree values, validating both endpoints first.
pub fn distance_between(
    lat1: f64,
    lng1: f64,
    lat2: f64,
    lng2: f64,
) -> Result<f64, LocatorError> {
    let a = Coordinate::new(lat1, lng1)?;
    let b = Coordinate::new(lat2, lng2)?;
    Ok(distance(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).expect("valid coordinate")
    }

    #[test]
    fn distance_to_self_is_zero() {
        for point in [
            coord(40.7128, -74.0060),
            coord(0.0, 0.0),
            coord(-33.8688, 151.2093),
            coord(90.0, 180.0),
        ] {
            assert_eq!(distance(point, point), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let downtown = coord(40.7128, -74.0060);
        let sydney = coord(-33.8688, 151.2093);
        assert_eq!(distance(downtown, sydney), distance(sydney, downtown));
    }

    #[test]
    fn downtown_to_midtown_is_about_three_miles() {
        let downtown = coord(40.7128, -74.0060);
        let midtown = coord(40.7589, -73.9851);
        let miles = distance(downtown, midtown);
        assert!((miles - 3.2).abs() <= 0.2, "got {miles}");
    }

    #[test]
    fn satisfies_triangle_inequality() {
        let a = coord(40.7128, -74.0060);
        let b = coord(40.7831, -73.9712);
        let c = coord(40.6892, -74.0445);
        assert!(distance(a, c) <= distance(a, b) + distance(b, c) + 1e-9);
    }

    #[test]
    fn antipodal_points_stay_finite() {
        let miles = distance(coord(0.0, 0.0), coord(0.0, 180.0));
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_MILES;
        assert!((miles - half_circumference).abs() < 1e-3);
    }

    #[test]
    fn raw_entry_point_rejects_invalid_input() {
        assert!(matches!(
            distance_between(91.0, 0.0, 0.0, 0.0),
            Err(LocatorError::InvalidCoordinate { .. })
        ));
        assert!(distance_between(0.0, 0.0, f64::NAN, 0.0).is_err());
        let miles = distance_between(40.7128, -74.0060, 40.7589, -73.9851).expect("valid");
        assert!(miles > 3.0 && miles < 3.4);
    }
}
