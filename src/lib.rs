//! Subscription Service
//!
//! A REST service that records users' paid subscriptions and answers
//! aggregate cost questions over them.
//!
//! # Features
//!
//! - Create, read, update, delete and list subscription records
//! - Month-granular dates exchanged as `MM-YYYY`
//! - Filtered cost totals per user (service name, date window)
//! - `SQLite` persistence with startup retry
//!
//! # Quick Start
//!
//! ```bash
//! DATABASE_PATH=./data/subscriptions.db HTTP_PORT=8080 ./subscription-service
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   HTTP/JSON    ┌──────────────────────┐
//! │   Client    │───────────────▶│  axum router         │
//! │             │◀───────────────│  SubscriptionService │
//! └─────────────┘                └──────────┬───────────┘
//!                                           │
//!                                           ▼
//!                                        SQLite
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod entity;
pub mod error;
pub mod server;
pub mod service;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod test_utils;
