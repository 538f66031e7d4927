//! gridref - WGS84 coordinate conversion between latitude/longitude, UTM and MGRS
//!
//! gridref projects geographic coordinates into Universal Transverse Mercator
//! zones and encodes them as Military Grid Reference System strings, and back.
//! Conversions are pure functions over small value types, safe to call from
//! any thread.
//!
//! # Examples
//!
//! ## Coordinate to MGRS and back
//!
//! ```
//! use gridref::{from_mgrs, to_mgrs, GeographicCoordinate};
//!
//! let coord = GeographicCoordinate::try_new(39.0, -77.0)?;
//! let mgrs = to_mgrs(coord, 5)?;
//! assert_eq!(mgrs, "18S UJ 26809 18679");
//!
//! let back = from_mgrs("18suj2680918679")?;
//! assert!((back.latitude - 39.0).abs() < 1e-4);
//! # Ok::<(), gridref::Error>(())
//! ```
//!
//! ## UTM and display formats
//!
//! ```
//! use gridref::{format, to_utm, CoordinateFormat, GeographicCoordinate, Hemisphere};
//!
//! let coord = GeographicCoordinate::new(60.0, 5.0);
//! let utm = to_utm(coord)?;
//! assert_eq!(utm.zone, 32);
//! assert_eq!(utm.hemisphere, Hemisphere::North);
//!
//! println!("{}", format(coord, CoordinateFormat::DegreesMinutesSeconds)?);
//! # Ok::<(), gridref::Error>(())
//! ```

pub mod api;
pub mod batch;
pub mod config;
pub mod error;
pub mod projection;
pub mod types;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use projection::{
    distance_meters, format, format_dms, from_mgrs, from_utm, to_mgrs, to_utm,
    GeographicCoordinate, Mgrs, UtmCoordinate, DEFAULT_PRECISION, MAX_PRECISION,
};
pub use types::{CoordinateFormat, Hemisphere};
