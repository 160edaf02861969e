//! Core `SQLite` storage implementation.
//!
//! This module provides the main [`SqliteStorage`] struct, the startup
//! bootstrap (connect with retry, then ensure the schema) and row helpers.

#![allow(clippy::missing_errors_doc)]

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::Row;
use uuid::Uuid;

use crate::entity::{DateValue, Subscription};
use crate::error::StorageError;

/// Wait added per failed connect attempt during bootstrap.
pub const DEFAULT_BACKOFF_UNIT: Duration = Duration::from_secs(1);

/// Column list shared by every statement that returns a subscription.
pub(crate) const SUBSCRIPTION_COLUMNS: &str =
    "id, user_id, start_date, finish_date, service_name, price";

/// `SQLite` storage backend for subscriptions.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pub(crate) pool: SqlitePool,
}

impl SqliteStorage {
    /// Get a clone of the connection pool.
    #[must_use]
    pub fn get_pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Connect to the database file and ensure the schema exists.
    ///
    /// Tries to connect up to `max_attempts` times (at least once). After
    /// failed attempt `i` it waits `i` seconds before the next one, so the
    /// worst case is `max_attempts * (max_attempts + 1) / 2` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] when every attempt fails and
    /// [`StorageError::MigrationFailed`] if the schema cannot be created.
    pub async fn bootstrap(
        database_path: impl AsRef<Path>,
        max_attempts: u32,
    ) -> Result<Self, StorageError> {
        Self::bootstrap_with_backoff(database_path, max_attempts, DEFAULT_BACKOFF_UNIT).await
    }

    /// Same as [`SqliteStorage::bootstrap`] with a custom backoff unit.
    pub async fn bootstrap_with_backoff(
        database_path: impl AsRef<Path>,
        max_attempts: u32,
        backoff_unit: Duration,
    ) -> Result<Self, StorageError> {
        let path = database_path.as_ref();
        let attempts = max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match Self::connect(path).await {
                Ok(pool) => {
                    tracing::info!(
                        attempt,
                        path = %path.display(),
                        "Connected to database"
                    );
                    let storage = Self { pool };
                    storage.run_migrations().await?;
                    return Ok(storage);
                }
                Err(message) => {
                    let wait = backoff_unit * attempt;
                    tracing::warn!(
                        attempt,
                        max_attempts = attempts,
                        wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                        error = %message,
                        "Database connection attempt failed"
                    );
                    last_error = message;
                    tokio::time::sleep(wait).await;
                }
            }
        }

        Err(StorageError::ConnectionFailed {
            attempts,
            message: last_error,
        })
    }

    /// Open a pool on the database file, creating it if missing.
    async fn connect(path: &Path) -> Result<SqlitePool, String> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create database directory: {e}"))?;
        }

        let options =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", path.display()))
                .map_err(|e| format!("Invalid database path: {e}"))?
                .journal_mode(SqliteJournalMode::Wal)
                .create_if_missing(true);

        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| format!("Failed to connect to database: {e}"))
    }

    /// Create a new in-memory `SQLite` storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ConnectionFailed`] if the connection fails.
    pub async fn new_in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| StorageError::ConnectionFailed {
                attempts: 1,
                message: format!("Invalid memory database options: {e}"),
            })?
            .journal_mode(SqliteJournalMode::Wal);

        // A second connection would open a second, empty in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed {
                attempts: 1,
                message: format!("Failed to create in-memory database: {e}"),
            })?;

        let storage = Self { pool };
        storage.run_migrations().await?;

        Ok(storage)
    }

    /// Ensure the schema exists. Idempotent.
    pub(crate) async fn run_migrations(&self) -> Result<(), StorageError> {
        let schema_001 = include_str!("../../migrations/001_subscriptions.sql");
        sqlx::query(schema_001)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::MigrationFailed {
                version: "001".to_string(),
                message: format!("Failed to run migration 001: {e}"),
            })?;

        Ok(())
    }

    /// Map a row selected with [`SUBSCRIPTION_COLUMNS`] into a [`Subscription`].
    pub(crate) fn subscription_from_row(row: &SqliteRow) -> Result<Subscription, StorageError> {
        let id: String = Self::column(row, "id")?;
        let user_id: String = Self::column(row, "user_id")?;
        let start_date: Option<String> = Self::column(row, "start_date")?;
        let finish_date: Option<String> = Self::column(row, "finish_date")?;
        let service_name: String = Self::column(row, "service_name")?;
        let price: i64 = Self::column(row, "price")?;

        let finish_date = Self::parse_date("finish_date", finish_date.as_deref())?;

        Ok(Subscription {
            id: Self::parse_uuid("id", &id)?,
            user_id: Self::parse_uuid("user_id", &user_id)?,
            start_date: Self::parse_date("start_date", start_date.as_deref())?,
            finish_date: (!finish_date.is_absent()).then_some(finish_date),
            service_name,
            price: u32::try_from(price).map_err(|_| StorageError::Internal {
                message: format!("Stored price {price} is out of range"),
            })?,
        })
    }

    fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, StorageError>
    where
        T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
    {
        row.try_get(name).map_err(|e| StorageError::Internal {
            message: format!("Failed to read column '{name}': {e}"),
        })
    }

    /// Parse a UUID column value.
    pub(crate) fn parse_uuid(column: &str, s: &str) -> Result<Uuid, StorageError> {
        Uuid::parse_str(s).map_err(|e| StorageError::Internal {
            message: format!("Failed to parse {column} '{s}': {e}"),
        })
    }

    /// Parse a date column value.
    pub(crate) fn parse_date(column: &str, s: Option<&str>) -> Result<DateValue, StorageError> {
        DateValue::from_storage(s).map_err(|e| StorageError::Internal {
            message: format!("Failed to parse {column}: {e}"),
        })
    }

    /// Create a query error with the given query name and message.
    pub(crate) fn query_error(query: &str, message: String) -> StorageError {
        StorageError::QueryFailed {
            query: query.to_string(),
            message,
        }
    }
}
