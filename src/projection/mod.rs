//! Geodesic conversions between latitude/longitude, UTM and MGRS
//!
//! Every function here is pure: inputs are passed by value and results are
//! freshly built, so conversions are safe to call from any thread.

pub mod coordinate;
pub mod distance;
pub mod ellipsoid;
pub mod format;
pub mod mgrs;
pub mod utm;

pub use coordinate::GeographicCoordinate;
pub use distance::{distance_meters, format_distance};
pub use format::{format, format_dms};
pub use mgrs::{from_mgrs, latitude_band, to_mgrs, Mgrs, DEFAULT_PRECISION, MAX_PRECISION};
pub use utm::{from_utm, to_utm, zone_number, UtmCoordinate};
