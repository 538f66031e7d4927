//! WGS84 ellipsoid parameters and UTM projection constants

/// Semi-major axis in meters
pub const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// Flattening
pub const FLATTENING: f64 = 1.0 / 298.257_223_563;

/// First eccentricity squared, `2f - f^2`
pub const ECCENTRICITY_SQUARED: f64 = 2.0 * FLATTENING - FLATTENING * FLATTENING;

/// Second eccentricity squared, `e^2 / (1 - e^2)`
pub const SECOND_ECCENTRICITY_SQUARED: f64 = ECCENTRICITY_SQUARED / (1.0 - ECCENTRICITY_SQUARED);

/// UTM central-meridian scale factor
pub const SCALE_FACTOR: f64 = 0.9996;

/// False easting applied at every zone's central meridian
pub const FALSE_EASTING: f64 = 500_000.0;

/// False northing applied in the southern hemisphere
pub const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Meridian arc coefficients (Snyder 3-21) through e^6
pub(crate) struct ArcCoefficients {
    pub m0: f64,
    pub m2: f64,
    pub m4: f64,
    pub m6: f64,
}

pub(crate) fn arc_coefficients() -> ArcCoefficients {
    let e2 = ECCENTRICITY_SQUARED;
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    ArcCoefficients {
        m0: 1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0,
        m2: 3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0,
        m4: 15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0,
        m6: 35.0 * e6 / 3072.0,
    }
}

/// Meridian arc length from the equator to `phi` (radians), in meters
pub fn meridian_arc(phi: f64) -> f64 {
    let c = arc_coefficients();
    SEMI_MAJOR_AXIS
        * (c.m0 * phi - c.m2 * (2.0 * phi).sin() + c.m4 * (4.0 * phi).sin()
            - c.m6 * (6.0 * phi).sin())
}

/// `e1 = (1 - sqrt(1 - e^2)) / (1 + sqrt(1 - e^2))`, used by the footpoint latitude series
pub fn e1() -> f64 {
    let root = (1.0 - ECCENTRICITY_SQUARED).sqrt();
    (1.0 - root) / (1.0 + root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eccentricity_squared() {
        assert!((ECCENTRICITY_SQUARED - 0.006_694_379_990_14).abs() < 1e-14);
        assert!((SECOND_ECCENTRICITY_SQUARED - 0.006_739_496_742_28).abs() < 1e-13);
    }

    #[test]
    fn test_meridian_arc_quarter() {
        // Equator to pole on WGS84 is 10,001,965.729 m
        let quarter = meridian_arc(std::f64::consts::FRAC_PI_2);
        assert!((quarter - 10_001_965.729).abs() < 0.01, "quarter = {}", quarter);
        assert_eq!(meridian_arc(0.0), 0.0);
    }

    #[test]
    fn test_e1() {
        assert!((e1() - 0.001_679_220_386).abs() < 1e-11);
    }
}
