//! Trait definitions for mockable dependencies.
//!
//! This module defines:
//! - [`SubscriptionRepository`]: persistence abstraction behind the service
//!
//! # Mocking
//!
//! The trait is annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates a mock implementation automatically for testing.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entity::{CreateRequest, Subscription, SubscriptionList, TotalRequest, TotalResponse};
use crate::error::StorageError;

/// Subscription persistence.
///
/// Implemented by [`crate::storage::SqliteStorage`]. The service only sees
/// this trait, so the backing store can be replaced or mocked.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert a subscription; the store assigns its id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::QueryFailed`] on constraint violation or
    /// connectivity failure.
    async fn add(&self, req: CreateRequest) -> Result<Subscription, StorageError>;

    /// Get a subscription by id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::SubscriptionNotFound`] if no row matches.
    async fn get(&self, id: Uuid) -> Result<Subscription, StorageError>;

    /// Replace every field of an existing subscription.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::SubscriptionNotFound`] if the id does not exist.
    async fn update(&self, sub: Subscription) -> Result<Subscription, StorageError>;

    /// Delete a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::SubscriptionNotFound`] if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<(), StorageError>;

    /// List every subscription.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails.
    async fn list(&self) -> Result<SubscriptionList, StorageError>;

    /// Sum and count the subscriptions matching the filters.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database operation fails. Zero
    /// matching rows is not an error.
    async fn total(&self, req: TotalRequest) -> Result<TotalResponse, StorageError>;
}
