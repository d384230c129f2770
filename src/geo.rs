use crate::models::CoordinatePoint;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometers.
pub fn haversine_km(a: CoordinatePoint, b: CoordinatePoint) -> f64 {
    let lat_delta = (b.latitude - a.latitude).to_radians();
    let lon_delta = (b.longitude - a.longitude).to_radians();

    let h = (lat_delta / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (lon_delta / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Sum of pairwise distances between consecutive points, in the order given.
/// An approximation of distance covered, not route length.
pub fn path_length_km(points: &[CoordinatePoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_km(pair[0], pair[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: f64, longitude: f64) -> CoordinatePoint {
        CoordinatePoint {
            latitude,
            longitude,
        }
    }

    #[test]
    fn one_degree_of_longitude_at_the_equator() {
        let km = haversine_km(point(0.0, 0.0), point(0.0, 1.0));
        // ~111.19 km; allow 1%.
        assert!((km - 111.2).abs() < 1.112, "got {km}");
    }

    #[test]
    fn zero_distance_for_identical_points() {
        assert_eq!(haversine_km(point(35.0, 139.0), point(35.0, 139.0)), 0.0);
    }

    #[test]
    fn path_length_sums_consecutive_legs() {
        let points = [point(0.0, 0.0), point(0.0, 1.0), point(0.0, 2.0)];
        let total = path_length_km(&points);
        let leg = haversine_km(points[0], points[1]);
        assert!((total - 2.0 * leg).abs() < 1e-9);
    }

    #[test]
    fn path_length_of_fewer_than_two_points_is_zero() {
        assert_eq!(path_length_km(&[]), 0.0);
        assert_eq!(path_length_km(&[point(1.0, 1.0)]), 0.0);
    }
}
