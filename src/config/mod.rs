//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading (with optional `.env` file)
//! - Configuration validation
//! - Default value handling
//!
//! # Example
//!
//! ```
//! use subscription_service::config::Config;
//!
//! // Create a config directly (use Config::from_env() in production)
//! let config = Config {
//!     database_path: "./data/subscriptions.db".to_string(),
//!     connect_attempts: 5,
//!     http_port: 8080,
//!     log_level: "info".to_string(),
//! };
//!
//! assert_eq!(config.listen_addr().port(), 8080);
//! ```

mod validation;

pub use validation::{validate_config, MAX_CONNECT_ATTEMPTS, MIN_CONNECT_ATTEMPTS};

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;

/// Default database path.
pub const DEFAULT_DATABASE_PATH: &str = "./data/subscriptions.db";

/// Default number of database connect attempts.
pub const DEFAULT_CONNECT_ATTEMPTS: u32 = 5;

/// Default HTTP listen port.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `SQLite` database file.
    pub database_path: String,
    /// How many times to try connecting at startup.
    pub connect_attempts: u32,
    /// HTTP listen port.
    pub http_port: u16,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `DATABASE_PATH`: Path to `SQLite` database (default: `./data/subscriptions.db`)
    /// - `DB_CONNECT_ATTEMPTS`: Startup connect attempts (default: `5`)
    /// - `HTTP_PORT`: Listen port (default: `8080`)
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `DB_CONNECT_ATTEMPTS` or `HTTP_PORT` is not a valid integer
    /// - Any value fails validation (see [`validate_config`])
    #[must_use = "configuration should be used"]
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.into());

        let connect_attempts = parse_env("DB_CONNECT_ATTEMPTS", DEFAULT_CONNECT_ATTEMPTS)?;
        let http_port = parse_env("HTTP_PORT", DEFAULT_HTTP_PORT)?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());

        let config = Self {
            database_path,
            connect_attempts,
            http_port,
            log_level,
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Log filter for [`Config::log_level`], falling back to the default level
    /// when the directive does not parse.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    }

    /// Address the HTTP server binds to (all interfaces).
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.http_port))
    }
}

/// Parse an environment variable as an unsigned integer, using a default if not set.
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    std::env::var(name).map_or(Ok(default), |val| {
        val.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.into(),
            reason: "must be a positive integer".into(),
        })
    })
}
