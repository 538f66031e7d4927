use crate::projection::coordinate::GeographicCoordinate;

/// Mean earth radius used for great-circle distances
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Haversine distance between two coordinates, in meters
pub fn distance_meters(from: GeographicCoordinate, to: GeographicCoordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Short display form: whole meters below 1 km, otherwise kilometers to one decimal
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters.floor() as i64)
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_distance() {
        let c = GeographicCoordinate::new(39.0, -77.0);
        assert_eq!(distance_meters(c, c), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let d = distance_meters(
            GeographicCoordinate::new(0.0, 0.0),
            GeographicCoordinate::new(1.0, 0.0),
        );
        assert!((d - 111_194.9).abs() < 0.1, "d = {}", d);
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(850.7), "850m");
        assert_eq!(format_distance(1234.0), "1.2km");
        assert_eq!(format_distance(25_060.0), "25.1km");
    }
}
