use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Northern limit of the UTM/MGRS grid (exclusive)
pub const MAX_GRID_LATITUDE: f64 = 84.0;

/// Southern limit of the UTM/MGRS grid (inclusive)
pub const MIN_GRID_LATITUDE: f64 = -80.0;

/// A latitude/longitude pair on the WGS84 ellipsoid, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeographicCoordinate {
    /// Creates a coordinate without validating it
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting values outside -90..=90 / -180..=180
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        coord.validate()?;
        Ok(coord)
    }

    /// Checks the coordinate lies on the WGS84 globe
    pub fn validate(&self) -> Result<()> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::InvalidLatitude(self.latitude));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::InvalidLongitude(self.longitude));
        }
        Ok(())
    }

    /// Checks the coordinate lies inside the UTM/MGRS grid (80S up to but excluding 84N)
    pub fn validate_for_grid(&self) -> Result<()> {
        self.validate()?;
        if self.latitude < MIN_GRID_LATITUDE || self.latitude >= MAX_GRID_LATITUDE {
            return Err(Error::UnsupportedZone(self.latitude));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_valid() {
        let coord = GeographicCoordinate::try_new(39.0, -77.0).unwrap();
        assert_eq!(coord.latitude, 39.0);
        assert_eq!(coord.longitude, -77.0);
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(matches!(
            GeographicCoordinate::try_new(91.0, 0.0),
            Err(Error::InvalidLatitude(_))
        ));
        assert!(matches!(
            GeographicCoordinate::try_new(0.0, -180.5),
            Err(Error::InvalidLongitude(_))
        ));
        assert!(matches!(
            GeographicCoordinate::try_new(f64::NAN, 0.0),
            Err(Error::InvalidLatitude(_))
        ));
    }

    #[test]
    fn test_grid_limits() {
        assert!(GeographicCoordinate::new(-80.0, 0.0).validate_for_grid().is_ok());
        assert!(GeographicCoordinate::new(83.999, 0.0).validate_for_grid().is_ok());
        assert!(matches!(
            GeographicCoordinate::new(84.0, 0.0).validate_for_grid(),
            Err(Error::UnsupportedZone(_))
        ));
        assert!(matches!(
            GeographicCoordinate::new(-80.1, 0.0).validate_for_grid(),
            Err(Error::UnsupportedZone(_))
        ));
    }
}
