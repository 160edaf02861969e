//! Storage backend.
//!
//! This module provides:
//! - `SQLite` connection bootstrap with retry and schema creation
//! - Subscription CRUD operations
//! - The filtered cost-total query builder
//!
//! # Architecture
//!
//! The storage layer uses `SQLite` with the `sqlx` crate for async operations.
//! Every operation is a single statement; nothing here opens a transaction.
//!
//! The implementation is split across submodules:
//! - `core`: Pool management, bootstrap, migrations and row mapping
//! - `subscription`: Subscription CRUD operations
//! - `total`: [`TotalQuery`] and the aggregate statement
//! - `trait_impl`: `SubscriptionRepository` implementation
//!
//! # Example
//!
//! ```ignore
//! use subscription_service::storage::SqliteStorage;
//!
//! let storage = SqliteStorage::bootstrap("./data/subscriptions.db", 5).await?;
//! let list = storage.list_subscriptions().await?;
//! ```

mod core;
mod subscription;
mod total;
mod trait_impl;

pub use self::core::{SqliteStorage, DEFAULT_BACKOFF_UNIT};
pub use total::{QueryValue, TotalQuery};
