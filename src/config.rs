//! Server configuration loaded from environment variables

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::projection::mgrs::{DEFAULT_PRECISION, MAX_PRECISION};

/// Environment variable for the listen address
pub const BIND_VAR: &str = "GRIDREF_BIND";
/// Environment variable for the request body limit in bytes
pub const BODY_LIMIT_VAR: &str = "GRIDREF_BODY_LIMIT";
/// Environment variable for the MGRS precision used when a request omits one
pub const PRECISION_VAR: &str = "GRIDREF_DEFAULT_PRECISION";

/// Options for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    ///
    /// Default is `0.0.0.0:3000`.
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,
    /// Largest accepted request body (CSV uploads).
    ///
    /// Default is 100 MiB.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
    /// MGRS precision used when a request does not specify one.
    ///
    /// Default is `5` (1 m).
    #[serde(default = "default_precision")]
    pub default_precision: u8,
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn default_body_limit() -> usize {
    100 * 1024 * 1024
}

fn default_precision() -> u8 {
    DEFAULT_PRECISION
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            body_limit_bytes: default_body_limit(),
            default_precision: default_precision(),
        }
    }
}

impl ServerConfig {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Builds a configuration from key/value pairs, ignoring unrelated keys
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let value = value.as_ref().trim();
            match key.as_ref() {
                BIND_VAR => {
                    config.bind_address = value
                        .parse()
                        .map_err(|e| Error::Config(format!("{}={}: {}", BIND_VAR, value, e)))?;
                }
                BODY_LIMIT_VAR => {
                    config.body_limit_bytes = value.parse().map_err(|e| {
                        Error::Config(format!("{}={}: {}", BODY_LIMIT_VAR, value, e))
                    })?;
                }
                PRECISION_VAR => {
                    config.default_precision = value
                        .parse()
                        .map_err(|e| Error::Config(format!("{}={}: {}", PRECISION_VAR, value, e)))?;
                }
                _ => {}
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks values that parse but cannot be used
    pub fn validate(&self) -> Result<()> {
        if self.default_precision == 0 || self.default_precision > MAX_PRECISION {
            return Err(Error::Config(format!(
                "{} must be between 1 and {}, got {}",
                PRECISION_VAR, MAX_PRECISION, self.default_precision
            )));
        }
        if self.body_limit_bytes == 0 {
            return Err(Error::Config(format!("{} must be positive", BODY_LIMIT_VAR)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_vars(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_address.port(), 3000);
        assert_eq!(config.default_precision, 5);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_vars([
            (BIND_VAR, "127.0.0.1:8080"),
            (BODY_LIMIT_VAR, "1024"),
            (PRECISION_VAR, "3"),
            ("PATH", "/usr/bin"),
        ])
        .unwrap();
        assert_eq!(config.bind_address, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.body_limit_bytes, 1024);
        assert_eq!(config.default_precision, 3);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            ServerConfig::from_vars([(BIND_VAR, "not an address")]),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ServerConfig::from_vars([(PRECISION_VAR, "9")]),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ServerConfig::from_vars([(BODY_LIMIT_VAR, "-1")]),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: ServerConfig = serde_json::from_str(r#"{"default_precision": 4}"#).unwrap();
        assert_eq!(config.default_precision, 4);
        assert_eq!(config.bind_address, default_bind_address());
    }
}
