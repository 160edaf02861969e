//! Error types for the subscription service.
//!
//! This module defines a hierarchical error system:
//! - [`AppError`]: Top-level application errors
//! - [`StorageError`]: Database operation errors
//! - [`DateError`]: Date text parsing errors
//! - [`ConfigError`]: Configuration errors
//!
//! All errors implement `Send + Sync` for async compatibility.

use thiserror::Error;

/// Top-level application error.
///
/// Returned by the startup path in `main`. Every variant is fatal there.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Date parsing error.
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP listener failed to bind or serve.
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Storage errors.
///
/// [`StorageError::SubscriptionNotFound`] is the only variant a caller is
/// expected to recover from; everything else is a persistence failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Could not open the database after every connect attempt.
    #[error("Database connection failed after {attempts} attempt(s): {message}")]
    ConnectionFailed {
        /// Number of attempts made.
        attempts: u32,
        /// Error reported by the last attempt.
        message: String,
    },

    /// A database query failed.
    #[error("Query failed: {query} - {message}")]
    QueryFailed {
        /// Short name of the statement that failed.
        query: String,
        /// Description of the failure.
        message: String,
    },

    /// No subscription row has the given id.
    #[error("Subscription not found: {id}")]
    SubscriptionNotFound {
        /// The subscription ID that was not found.
        id: String,
    },

    /// Creating the schema failed.
    #[error("Migration failed: {version} - {message}")]
    MigrationFailed {
        /// The migration version that failed.
        version: String,
        /// Description of the failure.
        message: String,
    },

    /// A stored row could not be mapped back into an entity.
    #[error("Internal storage error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl StorageError {
    /// Returns true if the error means the requested row does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::SubscriptionNotFound { .. })
    }
}

/// Date parsing errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Text matched none of the accepted date layouts.
    #[error("Invalid date format: {input:?} (expected MM-YYYY, RFC 3339 or YYYY-MM-DD)")]
    InvalidFormat {
        /// The rejected input.
        input: String,
    },
}

/// Configuration errors.
///
/// These errors represent failures in configuration loading and validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required configuration is missing.
    #[error("Missing required: {var}")]
    MissingRequired {
        /// The missing variable name.
        var: String,
    },

    /// Configuration value is invalid.
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue {
        /// The variable name.
        var: String,
        /// Why the value is invalid.
        reason: String,
    },
}
