//! Core data types for gridref

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// UTM hemisphere, selecting the false northing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    /// Northing measured from the equator
    North,
    /// Northing measured from a false origin of 10,000,000 m
    South,
}

impl Hemisphere {
    /// Hemisphere containing the given latitude (the equator counts as north)
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude >= 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        }
    }

    /// Returns the single-letter designator
    pub fn letter(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hemisphere::North => write!(f, "north"),
            Hemisphere::South => write!(f, "south"),
        }
    }
}

/// Display formats for a geographic coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateFormat {
    /// Military Grid Reference System, 1 m precision
    Mgrs,
    /// UTM grid zone plus whole-meter easting/northing
    Utm,
    /// Signed-free decimal degrees with hemisphere letters
    DecimalDegrees,
    /// Degrees, minutes, seconds
    DegreesMinutesSeconds,
}

impl CoordinateFormat {
    /// All formats, in menu order
    pub const ALL: [CoordinateFormat; 4] = [
        CoordinateFormat::Mgrs,
        CoordinateFormat::Utm,
        CoordinateFormat::DecimalDegrees,
        CoordinateFormat::DegreesMinutesSeconds,
    ];

    /// Returns the short display name of this format
    pub fn display_name(&self) -> &'static str {
        match self {
            CoordinateFormat::Mgrs => "MGRS",
            CoordinateFormat::Utm => "UTM",
            CoordinateFormat::DecimalDegrees => "DD",
            CoordinateFormat::DegreesMinutesSeconds => "DMS",
        }
    }

    /// Returns a sample value rendered in this format
    pub fn example(&self) -> &'static str {
        match self {
            CoordinateFormat::Mgrs => "18S UJ 26809 18679",
            CoordinateFormat::Utm => "18S 326809 4318679",
            CoordinateFormat::DecimalDegrees => "39.000000\u{00B0} N, 77.000000\u{00B0} W",
            CoordinateFormat::DegreesMinutesSeconds => {
                "39\u{00B0}00'00.00\"N 77\u{00B0}00'00.00\"W"
            }
        }
    }
}

impl fmt::Display for CoordinateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CoordinateFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mgrs" => Ok(CoordinateFormat::Mgrs),
            "utm" => Ok(CoordinateFormat::Utm),
            "dd" | "decimal-degrees" | "decimal_degrees" => Ok(CoordinateFormat::DecimalDegrees),
            "dms" | "degrees-minutes-seconds" | "degrees_minutes_seconds" => {
                Ok(CoordinateFormat::DegreesMinutesSeconds)
            }
            _ => Err(Error::UnknownFormat(s.trim().to_string())),
        }
    }
}
