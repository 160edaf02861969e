//! Server types and shared state.

use std::sync::Arc;

use crate::service::SubscriptionService;
use crate::storage::SqliteStorage;

/// Shared application state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Subscription operations.
    pub subscriptions: SubscriptionService,
}

impl AppState {
    /// Creates state from an existing service.
    #[must_use]
    pub const fn new(subscriptions: SubscriptionService) -> Self {
        Self { subscriptions }
    }

    /// Creates state backed by `SQLite` storage.
    #[must_use]
    pub fn from_storage(storage: SqliteStorage) -> Self {
        Self::new(SubscriptionService::new(Arc::new(storage)))
    }
}
