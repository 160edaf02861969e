//! Configuration validation.
//!
//! This module provides validation logic for configuration values,
//! ensuring they are within acceptable ranges.

use super::Config;
use crate::error::ConfigError;

/// Minimum number of database connect attempts.
pub const MIN_CONNECT_ATTEMPTS: u32 = 1;

/// Maximum number of database connect attempts (55s worst-case backoff).
pub const MAX_CONNECT_ATTEMPTS: u32 = 10;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if any value is out of range:
/// - `DATABASE_PATH` must not be empty
/// - `DB_CONNECT_ATTEMPTS` must be between 1 and 10
/// - `HTTP_PORT` must not be 0
#[must_use = "validation result should be checked"]
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.database_path.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: "DATABASE_PATH".into(),
            reason: "must not be empty".into(),
        });
    }

    if !(MIN_CONNECT_ATTEMPTS..=MAX_CONNECT_ATTEMPTS).contains(&config.connect_attempts) {
        return Err(ConfigError::InvalidValue {
            var: "DB_CONNECT_ATTEMPTS".into(),
            reason: format!(
                "must be between {MIN_CONNECT_ATTEMPTS} and {MAX_CONNECT_ATTEMPTS}"
            ),
        });
    }

    if config.http_port == 0 {
        return Err(ConfigError::InvalidValue {
            var: "HTTP_PORT".into(),
            reason: "must not be 0".into(),
        });
    }

    Ok(())
}
