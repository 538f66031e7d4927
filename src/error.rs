//! Error types for gridref

use std::fmt;
use std::io;

/// Result type for gridref operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in gridref operations
#[derive(Debug)]
pub enum Error {
    /// Latitude outside -90..=90 degrees
    InvalidLatitude(f64),

    /// Longitude outside -180..=180 degrees
    InvalidLongitude(f64),

    /// Latitude in the polar caps (>= 84N or < 80S) where UTM/MGRS is not defined
    UnsupportedZone(f64),

    /// Grid reference failed to parse
    MalformedGridReference(String),

    /// Zone number outside 1..=60
    OutOfRangeZoneNumber(u32),

    /// Grid precision outside 1..=5 digits
    InvalidPrecision(u8),

    /// Display format name not recognized
    UnknownFormat(String),

    /// I/O error
    Io(io::Error),

    /// CSV read/write error
    Csv(csv::Error),

    /// Invalid configuration value
    Config(String),
}

impl Error {
    /// Returns whether the error was caused by caller input rather than the environment
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::Csv(_) | Error::Config(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidLatitude(lat) => write!(f, "Invalid latitude: {}", lat),
            Error::InvalidLongitude(lon) => write!(f, "Invalid longitude: {}", lon),
            Error::UnsupportedZone(lat) => {
                write!(f, "Unsupported zone: latitude {} is in the polar (UPS) region", lat)
            }
            Error::MalformedGridReference(msg) => write!(f, "Malformed grid reference: {}", msg),
            Error::OutOfRangeZoneNumber(zone) => write!(f, "Zone number out of range: {}", zone),
            Error::InvalidPrecision(p) => write!(f, "Invalid precision: {} (expected 1-5)", p),
            Error::UnknownFormat(name) => write!(f, "Unknown coordinate format: {}", name),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Csv(e) => write!(f, "CSV error: {}", e),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Error::Csv(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MalformedGridReference("odd digit count".to_string());
        assert_eq!(err.to_string(), "Malformed grid reference: odd digit count");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_out_of_range_zone() {
        let err = Error::OutOfRangeZoneNumber(99);
        assert!(err.to_string().contains("99"));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_unknown_format_is_input_error() {
        let err = Error::UnknownFormat("ups".to_string());
        assert_eq!(err.to_string(), "Unknown coordinate format: ups");
        assert!(err.is_input_error());
        assert!(!Error::Config("bad".to_string()).is_input_error());
    }

    #[test]
    fn test_unsupported_zone() {
        let err = Error::UnsupportedZone(85.0);
        assert!(err.to_string().contains("85"));
    }
}
