//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SKINAURA_HOST` - Bind address (default: 127.0.0.1)
//! - `SKINAURA_PORT` - Listen port (default: 3000)
//! - `SKINAURA_DATA_PATH` - Path of the JSON data file (default: skinaura-data.json)
//! - `SKINAURA_SIMULATED_LATENCY` - Simulate catalog fetch latency (default: true)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Path of the JSON key-value data file
    pub data_path: PathBuf,
    /// Whether catalog fetches simulate network latency
    pub simulated_latency: bool,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SKINAURA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SKINAURA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SKINAURA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SKINAURA_PORT".to_string(), e.to_string()))?;
        let data_path = PathBuf::from(get_env_or_default("SKINAURA_DATA_PATH", "skinaura-data.json"));
        let simulated_latency = parse_bool("SKINAURA_SIMULATED_LATENCY", true)?;

        Ok(Self {
            host,
            port,
            data_path,
            simulated_latency,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a boolean variable, accepting `true`/`false`/`1`/`0`.
fn parse_bool(key: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(key) {
        Err(_) => Ok(default),
        Ok(value) => match value.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("expected true/false/1/0, got {other:?}"),
            )),
        },
    }
}
