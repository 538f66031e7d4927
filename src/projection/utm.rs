//! Universal Transverse Mercator projection on WGS84
//!
//! Forward and inverse use the Redfearn/Snyder series: the meridian arc is
//! carried through `sin 6φ`, the easting series through `A^5` and the
//! northing series through `A^6`. Dropping terms costs meters at zone edges.
//!
//! The inverse longitude series runs to `D^7`. Its `tan^6 φ` coefficient
//! dominates near 84°N, where the widened Svalbard zones reach 9° from
//! their central meridian.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::projection::coordinate::GeographicCoordinate;
use crate::projection::ellipsoid::{
    self, ECCENTRICITY_SQUARED as E2, FALSE_EASTING, FALSE_NORTHING_SOUTH, SCALE_FACTOR as K0,
    SECOND_ECCENTRICITY_SQUARED as EP2, SEMI_MAJOR_AXIS as A,
};
use crate::types::Hemisphere;

/// Number of 6-degree UTM zones
pub const ZONE_COUNT: u8 = 60;

/// A projected position within one UTM zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtmCoordinate {
    /// Zone number, 1..=60
    pub zone: u8,
    pub hemisphere: Hemisphere,
    /// Meters east, 500,000 at the central meridian
    pub easting: f64,
    /// Meters north of the equator, offset by 10,000,000 in the south
    pub northing: f64,
}

impl UtmCoordinate {
    pub fn new(zone: u8, hemisphere: Hemisphere, easting: f64, northing: f64) -> Self {
        Self {
            zone,
            hemisphere,
            easting,
            northing,
        }
    }
}

/// Resolves the UTM zone for a position, applying the Norway and Svalbard exceptions
pub fn zone_number(latitude: f64, longitude: f64) -> u8 {
    let naive = ((longitude + 180.0) / 6.0).floor() as i64 + 1;
    let mut zone = naive.clamp(1, ZONE_COUNT as i64) as u8;

    if (56.0..64.0).contains(&latitude) && (3.0..12.0).contains(&longitude) {
        zone = 32;
    }

    if (72.0..84.0).contains(&latitude) {
        if (0.0..9.0).contains(&longitude) {
            zone = 31;
        } else if (9.0..21.0).contains(&longitude) {
            zone = 33;
        } else if (21.0..33.0).contains(&longitude) {
            zone = 35;
        } else if (33.0..42.0).contains(&longitude) {
            zone = 37;
        }
    }

    zone
}

/// Longitude of a zone's central meridian, in degrees
pub fn central_meridian(zone: u8) -> f64 {
    (zone as f64 - 1.0) * 6.0 - 180.0 + 3.0
}

/// Projects a geographic coordinate into its UTM zone
pub fn to_utm(coord: GeographicCoordinate) -> Result<UtmCoordinate> {
    coord.validate_for_grid()?;

    let zone = zone_number(coord.latitude, coord.longitude);
    let phi = coord.latitude.to_radians();
    let lambda = coord.longitude.to_radians();
    let lambda0 = central_meridian(zone).to_radians();

    let sin_phi = phi.sin();
    let cos_phi = phi.cos();
    let tan_phi = phi.tan();

    let n = A / (1.0 - E2 * sin_phi * sin_phi).sqrt();
    let t = tan_phi * tan_phi;
    let c = EP2 * cos_phi * cos_phi;
    let a = cos_phi * (lambda - lambda0);
    let m = ellipsoid::meridian_arc(phi);

    let a2 = a * a;
    let a3 = a2 * a;
    let a4 = a3 * a;
    let a5 = a4 * a;
    let a6 = a5 * a;

    let easting = K0
        * n
        * (a + (1.0 - t + c) * a3 / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * EP2) * a5 / 120.0)
        + FALSE_EASTING;

    let mut northing = K0
        * (m + n
            * tan_phi
            * (a2 / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * EP2) * a6 / 720.0));

    let hemisphere = Hemisphere::from_latitude(coord.latitude);
    if hemisphere == Hemisphere::South {
        northing += FALSE_NORTHING_SOUTH;
    }

    Ok(UtmCoordinate {
        zone,
        hemisphere,
        easting,
        northing,
    })
}

/// Converts a UTM position back to latitude/longitude
pub fn from_utm(utm: &UtmCoordinate) -> Result<GeographicCoordinate> {
    if utm.zone < 1 || utm.zone > ZONE_COUNT {
        return Err(Error::OutOfRangeZoneNumber(utm.zone as u32));
    }

    let e1 = ellipsoid::e1();
    let arc = ellipsoid::arc_coefficients();

    let x = utm.easting - FALSE_EASTING;
    let mut y = utm.northing;
    if utm.hemisphere == Hemisphere::South {
        y -= FALSE_NORTHING_SOUTH;
    }

    // Footpoint latitude
    let m = y / K0;
    let mu = m / (A * arc.m0);
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin();

    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();
    let w = 1.0 - E2 * sin_phi1 * sin_phi1;

    let n1 = A / w.sqrt();
    let t1 = tan_phi1 * tan_phi1;
    let c1 = EP2 * cos_phi1 * cos_phi1;
    let r1 = A * (1.0 - E2) / w.powf(1.5);
    let d = x / (n1 * K0);

    let d2 = d * d;
    let d3 = d2 * d;
    let d4 = d3 * d;
    let d5 = d4 * d;
    let d6 = d5 * d;
    let d7 = d6 * d;

    let latitude = phi1
        - (n1 * tan_phi1 / r1)
            * (d2 / 2.0 - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * EP2) * d4 / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * EP2 - 3.0 * c1 * c1)
                    * d6
                    / 720.0);

    let longitude = (d - (1.0 + 2.0 * t1 + c1) * d3 / 6.0
        + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * EP2 + 24.0 * t1 * t1) * d5 / 120.0
        - (61.0 + 662.0 * t1 + 1320.0 * t1 * t1 + 720.0 * t1 * t1 * t1) * d7 / 5040.0)
        / cos_phi1;

    Ok(GeographicCoordinate::new(
        latitude.to_degrees(),
        central_meridian(utm.zone) + longitude.to_degrees(),
    ))
}
