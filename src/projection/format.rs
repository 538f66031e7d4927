//! Display strings for geographic coordinates

use crate::error::Result;
use crate::projection::coordinate::GeographicCoordinate;
use crate::projection::mgrs::{self, DEFAULT_PRECISION};
use crate::projection::utm;
use crate::types::CoordinateFormat;

/// Renders a coordinate in the requested display format
pub fn format(coord: GeographicCoordinate, format: CoordinateFormat) -> Result<String> {
    match format {
        CoordinateFormat::Mgrs => mgrs::to_mgrs(coord, DEFAULT_PRECISION),
        CoordinateFormat::Utm => {
            let utm = utm::to_utm(coord)?;
            Ok(format!(
                "{}{} {} {}",
                utm.zone,
                mgrs::latitude_band(coord.latitude),
                utm.easting.floor() as i64,
                utm.northing.floor() as i64
            ))
        }
        CoordinateFormat::DecimalDegrees => {
            coord.validate()?;
            Ok(format!(
                "{:.6}\u{00B0} {}, {:.6}\u{00B0} {}",
                coord.latitude.abs(),
                if coord.latitude >= 0.0 { 'N' } else { 'S' },
                coord.longitude.abs(),
                if coord.longitude >= 0.0 { 'E' } else { 'W' }
            ))
        }
        CoordinateFormat::DegreesMinutesSeconds => format_dms(coord),
    }
}

/// Renders a coordinate as degrees, minutes and hundredths of seconds
pub fn format_dms(coord: GeographicCoordinate) -> Result<String> {
    coord.validate()?;
    Ok(format!(
        "{} {}",
        dms_component(coord.latitude, 'N', 'S'),
        dms_component(coord.longitude, 'E', 'W')
    ))
}

fn dms_component(value: f64, positive: char, negative: char) -> String {
    // Round once in hundredths of a second so 59.999" carries into the minute
    let hundredths = (value.abs() * 360_000.0).round() as u64;
    let degrees = hundredths / 360_000;
    let minutes = (hundredths / 6_000) % 60;
    let seconds = (hundredths % 6_000) as f64 / 100.0;
    let hemisphere = if value >= 0.0 { positive } else { negative };
    format!("{}\u{00B0}{:02}'{:05.2}\"{}", degrees, minutes, seconds, hemisphere)
}
