//! HTTP server implementation.
//!
//! This module provides:
//! - REST handlers for subscription CRUD and cost totals
//! - Route table under `/api/v1/subscription`
//! - JSON error envelope with stable codes
//! - Server lifecycle with graceful shutdown
//!
//! # Example
//!
//! ```no_run
//! use subscription_service::server::{build_router, AppState};
//! use subscription_service::storage::SqliteStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = SqliteStorage::bootstrap("./data/subscriptions.db", 5).await?;
//! let router = build_router(AppState::from_storage(storage));
//! # let _ = router;
//! # Ok(())
//! # }
//! ```

mod app;
mod error;
mod handlers;
mod routes;
mod types;

pub use app::{serve, SubscriptionServer};
pub use error::{ApiError, ApiResult, ErrorDetail, ErrorResponse};
pub use handlers::HealthResponse;
pub use routes::{build_router, API_PREFIX};
pub use types::AppState;
