//! Military Grid Reference System encoding on top of UTM
//!
//! A reference is `{zone}{band} {column}{row} {easting} {northing}`. The band
//! letter follows uniform 8-degree strips from 80S, the column letter cycles
//! through 24 letters in sets of 8 per zone, and the row letter cycles every
//! 2,000,000 m through 20 letters, offset by 5 in even zones. `I` and `O`
//! never appear.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::projection::coordinate::GeographicCoordinate;
use crate::projection::ellipsoid::FALSE_NORTHING_SOUTH;
use crate::projection::utm::{self, UtmCoordinate, ZONE_COUNT};
use crate::types::Hemisphere;

/// Latitude band letters from 80S northwards
pub const BAND_LETTERS: [char; 20] = [
    'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W',
    'X',
];

/// 100 km column letters, A-Z without I and O
pub const COLUMN_LETTERS: [char; 24] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

/// 100 km row letters, A-V without I and O
pub const ROW_LETTERS: [char; 20] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V',
];

/// Digits per axis for a 1 m reference
pub const MAX_PRECISION: u8 = 5;

/// Precision used when the caller does not choose one
pub const DEFAULT_PRECISION: u8 = MAX_PRECISION;

const SQUARE_SIZE: u32 = 100_000;
const ROW_CYCLE: f64 = 2_000_000.0;
const BAND_HEIGHT_DEGREES: f64 = 8.0;
// Approximate length of one degree of latitude, used for band northing limits
const METERS_PER_DEGREE: f64 = 111_000.0;
const MIN_REFERENCE_LENGTH: usize = 5;

/// Returns the band letter for a latitude, clamped to C..X
pub fn latitude_band(latitude: f64) -> char {
    let index = ((latitude + 80.0) / BAND_HEIGHT_DEGREES).floor() as i64;
    BAND_LETTERS[index.clamp(0, BAND_LETTERS.len() as i64 - 1) as usize]
}

fn band_index(band: char) -> Option<usize> {
    BAND_LETTERS.iter().position(|&c| c == band)
}

/// Bands below N lie in the southern hemisphere
fn band_hemisphere(index: usize) -> Hemisphere {
    if index < 10 {
        Hemisphere::South
    } else {
        Hemisphere::North
    }
}

/// Approximate northing span `[min, max)` covered by a band, in meters
fn band_northing_span(index: usize) -> (f64, f64) {
    let south_edge = -80.0 + BAND_HEIGHT_DEGREES * index as f64;
    let mut min = south_edge * METERS_PER_DEGREE;
    if band_hemisphere(index) == Hemisphere::South {
        min += FALSE_NORTHING_SOUTH;
    }
    // X stretches to 84N
    let height = if index == BAND_LETTERS.len() - 1 { 12.0 } else { BAND_HEIGHT_DEGREES };
    (min, min + height * METERS_PER_DEGREE)
}

fn set_index(zone: u8) -> usize {
    (zone as usize - 1) % 3
}

fn row_offset(zone: u8) -> usize {
    if zone % 2 == 0 {
        5
    } else {
        0
    }
}

fn column_letter(zone: u8, easting: f64) -> char {
    let e100k = (easting / SQUARE_SIZE as f64).floor() as i64;
    let index = (set_index(zone) as i64 * 8 + e100k - 1).rem_euclid(COLUMN_LETTERS.len() as i64);
    COLUMN_LETTERS[index as usize]
}

fn row_letter(zone: u8, northing: f64) -> char {
    let n100k = (northing / SQUARE_SIZE as f64).floor() as i64;
    let index = (n100k + row_offset(zone) as i64).rem_euclid(ROW_LETTERS.len() as i64);
    ROW_LETTERS[index as usize]
}

fn check_precision(precision: u8) -> Result<()> {
    if precision == 0 || precision > MAX_PRECISION {
        return Err(Error::InvalidPrecision(precision));
    }
    Ok(())
}

fn malformed(msg: impl Into<String>) -> Error {
    let msg = msg.into();
    tracing::debug!(reason = %msg, "rejected grid reference");
    Error::MalformedGridReference(msg)
}

/// A parsed or computed MGRS reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mgrs {
    zone: u8,
    band: char,
    column: char,
    row: char,
    easting: u32,
    northing: u32,
    precision: u8,
}

impl Mgrs {
    /// Encodes a coordinate with `precision` digits per axis (1 = 10 km .. 5 = 1 m)
    pub fn from_coordinate(coord: GeographicCoordinate, precision: u8) -> Result<Self> {
        check_precision(precision)?;
        let utm = utm::to_utm(coord)?;

        let divisor = 10u32.pow((MAX_PRECISION - precision) as u32);
        let square = SQUARE_SIZE as i64;
        let easting = (utm.easting.floor() as i64).rem_euclid(square) as u32 / divisor;
        let northing = (utm.northing.floor() as i64).rem_euclid(square) as u32 / divisor;

        Ok(Self {
            zone: utm.zone,
            band: latitude_band(coord.latitude),
            column: column_letter(utm.zone, utm.easting),
            row: row_letter(utm.zone, utm.northing),
            easting,
            northing,
            precision,
        })
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn band(&self) -> char {
        self.band
    }

    pub fn column(&self) -> char {
        self.column
    }

    pub fn row(&self) -> char {
        self.row
    }

    /// Easting digits at this reference's precision
    pub fn easting(&self) -> u32 {
        self.easting
    }

    /// Northing digits at this reference's precision
    pub fn northing(&self) -> u32 {
        self.northing
    }

    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Hemisphere implied by the band letter
    pub fn hemisphere(&self) -> Hemisphere {
        band_index(self.band)
            .map(band_hemisphere)
            .unwrap_or(Hemisphere::North)
    }

    /// Zone number and band, e.g. `18S`
    pub fn grid_zone_designator(&self) -> String {
        format!("{}{}", self.zone, self.band)
    }

    /// 100 km square letters, e.g. `UJ`
    pub fn square_id(&self) -> String {
        format!("{}{}", self.column, self.row)
    }

    /// Returns the same reference truncated to fewer digits
    pub fn with_precision(&self, precision: u8) -> Result<Self> {
        check_precision(precision)?;
        if precision > self.precision {
            return Err(Error::InvalidPrecision(precision));
        }
        let divisor = 10u32.pow((self.precision - precision) as u32);
        Ok(Self {
            easting: self.easting / divisor,
            northing: self.northing / divisor,
            precision,
            ..*self
        })
    }

    /// Rebuilds the full UTM position of the reference's south-west corner
    pub fn to_utm(&self) -> Result<UtmCoordinate> {
        let index = band_index(self.band)
            .ok_or_else(|| malformed(format!("invalid latitude band '{}'", self.band)))?;
        let hemisphere = band_hemisphere(index);
        let scale = 10u32.pow((MAX_PRECISION - self.precision) as u32);

        let column = COLUMN_LETTERS
            .iter()
            .position(|&c| c == self.column)
            .ok_or_else(|| malformed(format!("invalid column letter '{}'", self.column)))?;
        let e100k = column as i64 - set_index(self.zone) as i64 * 8 + 1;
        if !(1..=8).contains(&e100k) {
            return Err(malformed(format!(
                "column letter '{}' is not used in zone {}",
                self.column, self.zone
            )));
        }
        let easting = (e100k as u32 * SQUARE_SIZE + self.easting * scale) as f64;

        let row = ROW_LETTERS
            .iter()
            .position(|&c| c == self.row)
            .ok_or_else(|| malformed(format!("invalid row letter '{}'", self.row)))?;
        let n100k =
            (row as i64 - row_offset(self.zone) as i64).rem_euclid(ROW_LETTERS.len() as i64);
        let mut northing = (n100k as u32 * SQUARE_SIZE + self.northing * scale) as f64;

        let (min, max) = band_northing_span(index);
        while northing < min {
            northing += ROW_CYCLE;
        }
        // The approximate band edge can sit a few km north of the true one;
        // take the previous cycle when it lies closer to the band.
        let lower = northing - ROW_CYCLE;
        if min - lower < northing - max {
            tracing::debug!(
                band = %self.band,
                northing,
                "northing resolved to previous 2,000 km cycle"
            );
            northing = lower;
        }

        Ok(UtmCoordinate::new(self.zone, hemisphere, easting, northing))
    }

    /// Converts the reference to latitude/longitude
    pub fn to_coordinate(&self) -> Result<GeographicCoordinate> {
        utm::from_utm(&self.to_utm()?)
    }
}

impl fmt::Display for Mgrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.precision as usize;
        write!(
            f,
            "{}{} {}{} {:0width$} {:0width$}",
            self.zone,
            self.band,
            self.column,
            self.row,
            self.easting,
            self.northing,
            width = width
        )
    }
}

impl FromStr for Mgrs {
    type Err = Error;

    /// Parses a reference, ignoring whitespace and case
    fn from_str(s: &str) -> Result<Self> {
        let clean: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if clean.len() < MIN_REFERENCE_LENGTH {
            return Err(malformed(format!("'{}' is too short", s.trim())));
        }

        let zone_len = clean.iter().take_while(|c| c.is_ascii_digit()).count();
        if zone_len == 0 {
            return Err(malformed("missing zone number"));
        }
        let zone_str: String = clean[..zone_len].iter().collect();
        let zone: u32 = zone_str
            .parse()
            .map_err(|_| malformed(format!("invalid zone number '{}'", zone_str)))?;
        if zone < 1 || zone > ZONE_COUNT as u32 {
            tracing::debug!(zone, "rejected grid reference zone");
            return Err(Error::OutOfRangeZoneNumber(zone));
        }
        let zone = zone as u8;

        let mut rest = clean[zone_len..].iter().copied();
        let band = rest.next().ok_or_else(|| malformed("missing latitude band"))?;
        if band_index(band).is_none() {
            return Err(malformed(format!("invalid latitude band '{}'", band)));
        }

        let column = rest.next().ok_or_else(|| malformed("missing 100 km square"))?;
        let row = rest.next().ok_or_else(|| malformed("missing 100 km square"))?;
        if !COLUMN_LETTERS.contains(&column) || !ROW_LETTERS.contains(&row) {
            return Err(malformed(format!("invalid 100 km square '{}{}'", column, row)));
        }

        let digits: String = rest.collect();
        if digits.is_empty() {
            return Err(malformed("missing easting and northing"));
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(malformed(format!("non-numeric easting/northing '{}'", digits)));
        }
        if digits.len() % 2 != 0 {
            return Err(malformed(format!(
                "easting/northing '{}' has an odd number of digits",
                digits
            )));
        }
        let half = digits.len() / 2;
        if half > MAX_PRECISION as usize {
            return Err(malformed(format!(
                "easting/northing '{}' is finer than 1 m",
                digits
            )));
        }

        let easting = digits[..half]
            .parse()
            .map_err(|_| malformed(format!("invalid easting '{}'", &digits[..half])))?;
        let northing = digits[half..]
            .parse()
            .map_err(|_| malformed(format!("invalid northing '{}'", &digits[half..])))?;

        let mgrs = Mgrs {
            zone,
            band,
            column,
            row,
            easting,
            northing,
            precision: half as u8,
        };

        // Reject column letters outside the zone's set up front
        mgrs.to_utm()?;
        Ok(mgrs)
    }
}

/// Formats a coordinate as an MGRS string, e.g. `18S UJ 26809 18679`
pub fn to_mgrs(coord: GeographicCoordinate, precision: u8) -> Result<String> {
    Ok(Mgrs::from_coordinate(coord, precision)?.to_string())
}

/// Parses an MGRS string (spaces optional, any case) into a coordinate
///
/// The result is the south-west corner of the cell the reference names, so
/// a 1 m reference lies up to 1 m east and 1 m north of the point it was
/// built from.
pub fn from_mgrs(reference: &str) -> Result<GeographicCoordinate> {
    reference.parse::<Mgrs>()?.to_coordinate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::distance::distance_meters;

    fn coord(lat: f64, lon: f64) -> GeographicCoordinate {
        GeographicCoordinate::new(lat, lon)
    }

    fn assert_reference_round_trip(lat: f64, lon: f64) {
        let c = coord(lat, lon);
        let utm = utm::to_utm(c).unwrap();
        let mgrs = Mgrs::from_coordinate(c, 5).unwrap();

        for letter in [mgrs.band(), mgrs.column(), mgrs.row()] {
            assert!(letter != 'I' && letter != 'O', "{} at ({}, {})", mgrs, lat, lon);
        }

        let rebuilt = mgrs.to_string().parse::<Mgrs>().unwrap().to_utm().unwrap();
        assert_eq!(rebuilt.zone, utm.zone);
        assert_eq!(rebuilt.hemisphere, utm.hemisphere);
        let de = utm.easting - rebuilt.easting;
        let dn = utm.northing - rebuilt.northing;
        assert!((0.0..1.0).contains(&de), "{} easting off by {} at ({}, {})", mgrs, de, lat, lon);
        assert!((0.0..1.0).contains(&dn), "{} northing off by {} at ({}, {})", mgrs, dn, lat, lon);
    }

    #[test]
    fn test_latitude_band() {
        assert_eq!(latitude_band(-80.0), 'C');
        assert_eq!(latitude_band(-0.1), 'M');
        assert_eq!(latitude_band(0.0), 'N');
        assert_eq!(latitude_band(39.0), 'S');
        assert_eq!(latitude_band(72.0), 'X');
        assert_eq!(latitude_band(83.9), 'X');
        assert_eq!(latitude_band(-85.0), 'C');
    }

    #[test]
    fn test_known_fixed_point() {
        let mgrs = to_mgrs(coord(39.0, -77.0), 5).unwrap();
        assert_eq!(mgrs, "18S UJ 26809 18679");

        let back = from_mgrs(&mgrs).unwrap();
        assert!(distance_meters(coord(39.0, -77.0), back) < 1.0);
        // south-west corner of the 1 m cell
        assert!(back.latitude < 39.0 && back.longitude < -77.0, "{:?}", back);
    }

    #[test]
    fn test_precision_truncation() {
        let c = coord(39.0, -77.0);
        assert_eq!(to_mgrs(c, 1).unwrap(), "18S UJ 2 1");
        assert_eq!(to_mgrs(c, 2).unwrap(), "18S UJ 26 18");
        assert_eq!(to_mgrs(c, 3).unwrap(), "18S UJ 268 186");
        assert_eq!(to_mgrs(c, 4).unwrap(), "18S UJ 2680 1867");
    }

    #[test]
    fn test_precision_monotonic() {
        let full = Mgrs::from_coordinate(coord(-33.8688, 151.2093), 5).unwrap();
        let full_text = full.to_string();
        let parts: Vec<&str> = full_text.split(' ').collect();
        for p in 1..=5u8 {
            let text = to_mgrs(coord(-33.8688, 151.2093), p).unwrap();
            let coarse: Vec<&str> = text.split(' ').collect();
            assert_eq!(coarse[0], parts[0]);
            assert_eq!(coarse[1], parts[1]);
            assert_eq!(coarse[2], &parts[2][..p as usize]);
            assert_eq!(coarse[3], &parts[3][..p as usize]);
            assert_eq!(full.with_precision(p).unwrap().to_string(), text);
        }
    }

    #[test]
    fn test_invalid_precision() {
        assert!(matches!(to_mgrs(coord(39.0, -77.0), 0), Err(Error::InvalidPrecision(0))));
        assert!(matches!(to_mgrs(coord(39.0, -77.0), 6), Err(Error::InvalidPrecision(6))));
        let coarse = Mgrs::from_coordinate(coord(39.0, -77.0), 2).unwrap();
        assert!(coarse.with_precision(4).is_err());
    }

    #[test]
    fn test_known_references() {
        assert_eq!(to_mgrs(coord(60.0, 5.0), 5).unwrap(), "32V KM 76979 58157");
        assert_eq!(to_mgrs(coord(-33.8688, 151.2093), 5).unwrap(), "56H LH 34368 50948");
        assert_eq!(to_mgrs(coord(51.5007, -0.1246), 5).unwrap(), "30U XC 99567 09427");
        assert_eq!(to_mgrs(coord(78.2232, 15.6267), 5).unwrap(), "33X WG 14278 83355");
        assert_eq!(to_mgrs(coord(0.0, 0.0), 5).unwrap(), "31N AA 66021 00000");
        assert_eq!(to_mgrs(coord(-45.0, 170.0), 5).unwrap(), "59G ML 21184 16563");
    }

    #[test]
    fn test_zone_exception() {
        let mgrs = Mgrs::from_coordinate(coord(60.0, 5.0), 5).unwrap();
        assert_eq!(mgrs.zone(), 32);
        assert_eq!(mgrs.grid_zone_designator(), "32V");
        assert_eq!(mgrs.square_id(), "KM");
    }

    #[test]
    fn test_polar_rejected() {
        assert!(matches!(to_mgrs(coord(84.0, 0.0), 5), Err(Error::UnsupportedZone(_))));
        assert!(matches!(to_mgrs(coord(-80.5, 0.0), 5), Err(Error::UnsupportedZone(_))));
    }

    #[test]
    fn test_parse_spacing_and_case() {
        let spaced = from_mgrs("18S UJ 26809 18679").unwrap();
        let packed = from_mgrs("18SUJ2680918679").unwrap();
        let lower = from_mgrs(" 18s uj\t26809 18679 ").unwrap();
        assert_eq!(spaced, packed);
        assert_eq!(spaced, lower);
        assert!((spaced.latitude - 39.0).abs() < 1e-4);
        assert!((spaced.longitude + 77.0).abs() < 1e-4);
    }

    #[test]
    fn test_parse_fields() {
        let mgrs: Mgrs = "4QFJ1234567890".parse().unwrap();
        assert_eq!(mgrs.zone(), 4);
        assert_eq!(mgrs.band(), 'Q');
        assert_eq!(mgrs.square_id(), "FJ");
        assert_eq!(mgrs.easting(), 12345);
        assert_eq!(mgrs.northing(), 67890);
        assert_eq!(mgrs.precision(), 5);
        assert_eq!(mgrs.hemisphere(), Hemisphere::North);
        assert_eq!(mgrs.to_string(), "4Q FJ 12345 67890");
    }

    #[test]
    fn test_parse_three_digit_reference() {
        let mgrs: Mgrs = "18TWL123456".parse().unwrap();
        assert_eq!(mgrs.precision(), 3);
        assert_eq!(mgrs.easting(), 123);
        assert_eq!(mgrs.northing(), 456);
        let utm = mgrs.to_utm().unwrap();
        assert_eq!(utm.easting, 512_300.0);
        assert_eq!(utm.northing, 4_545_600.0);
    }

    #[test]
    fn test_malformed_rejected() {
        assert!(matches!(from_mgrs(""), Err(Error::MalformedGridReference(_))));
        assert!(matches!(from_mgrs("   "), Err(Error::MalformedGridReference(_))));
        assert!(matches!(from_mgrs("99ABC12345"), Err(Error::OutOfRangeZoneNumber(99))));
        assert!(matches!(from_mgrs("0SUJ1234"), Err(Error::OutOfRangeZoneNumber(0))));
        assert!(matches!(from_mgrs("18TWL1234567"), Err(Error::MalformedGridReference(_))));
        assert!(matches!(from_mgrs("18SUJ"), Err(Error::MalformedGridReference(_))));
        assert!(matches!(from_mgrs("SUJ1234"), Err(Error::MalformedGridReference(_))));
        assert!(matches!(from_mgrs("18SUJ12a4"), Err(Error::MalformedGridReference(_))));
        assert!(matches!(from_mgrs("18AUJ1234"), Err(Error::MalformedGridReference(_))));
        assert!(matches!(from_mgrs("18SIJ1234"), Err(Error::MalformedGridReference(_))));
        assert!(matches!(from_mgrs("18SUO1234"), Err(Error::MalformedGridReference(_))));
        assert!(matches!(from_mgrs("18SAJ1234"), Err(Error::MalformedGridReference(_))));
        assert!(matches!(from_mgrs("18SUJ123456123456"), Err(Error::MalformedGridReference(_))));
        assert!(matches!(
            from_mgrs("123456789012SUJ12"),
            Err(Error::MalformedGridReference(_))
        ));
    }

    #[test]
    fn test_southern_hemisphere_from_band() {
        let mgrs: Mgrs = "56HLH3436850948".parse().unwrap();
        assert_eq!(mgrs.hemisphere(), Hemisphere::South);
        let back = mgrs.to_coordinate().unwrap();
        assert!(distance_meters(coord(-33.8688, 151.2093), back) < 1.5);
    }

    #[test]
    fn test_round_trip_sweep() {
        let mut lat = -79.99;
        while lat < 84.0 {
            let mut lon = -180.0;
            while lon < 180.0 {
                assert_reference_round_trip(lat, lon);
                lon += 1.13;
            }
            lat += 0.37;
        }
    }

    #[test]
    fn test_round_trip_band_edges() {
        for k in 0..BAND_LETTERS.len() {
            let edge = -80.0 + 8.0 * k as f64;
            let mut lon = -180.0;
            while lon < 180.0 {
                if k > 0 {
                    assert_reference_round_trip(edge - 1e-6, lon);
                }
                assert_reference_round_trip(edge, lon);
                assert_reference_round_trip(edge + 1e-6, lon);
                lon += 0.5;
            }
        }
    }

    #[test]
    fn test_round_trip_within_grid_resolution() {
        for &(lat, lon) in &[
            (39.0, -77.0),
            (8.00001, -75.0),
            (72.00001, 15.2),
            (-79.9999, 12.0),
            (-0.0000001, 0.5),
            (48.000004, -36.4457),
            (63.99, 11.99),
        ] {
            let c = coord(lat, lon);
            let back = from_mgrs(&to_mgrs(c, 5).unwrap()).unwrap();
            // floor truncation on both axes bounds the error by sqrt(2) m
            assert!(distance_meters(c, back) < 1.5, "({}, {}) -> {:?}", lat, lon, back);
        }
    }
}
