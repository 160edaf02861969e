//! `SubscriptionRepository` implementation for `SqliteStorage`.

#![allow(clippy::missing_errors_doc)]

use async_trait::async_trait;
use uuid::Uuid;

use crate::entity::{CreateRequest, Subscription, SubscriptionList, TotalRequest, TotalResponse};
use crate::error::StorageError;
use crate::traits::SubscriptionRepository;

use super::core::SqliteStorage;

#[async_trait]
impl SubscriptionRepository for SqliteStorage {
    async fn add(&self, req: CreateRequest) -> Result<Subscription, StorageError> {
        self.add_subscription(&req).await
    }

    async fn get(&self, id: Uuid) -> Result<Subscription, StorageError> {
        self.get_subscription(id).await
    }

    async fn update(&self, sub: Subscription) -> Result<Subscription, StorageError> {
        self.update_subscription(&sub).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), StorageError> {
        self.delete_subscription(id).await
    }

    async fn list(&self) -> Result<SubscriptionList, StorageError> {
        self.list_subscriptions().await
    }

    async fn total(&self, req: TotalRequest) -> Result<TotalResponse, StorageError> {
        self.total_cost(&req).await
    }
}
