//! Subscription service.
//!
//! [`SubscriptionService`] is the single entry point the HTTP layer calls.
//! Each method maps 1:1 onto a [`SubscriptionRepository`] call and adds
//! nothing but a tracing span, so persistence can be swapped or mocked
//! without touching the handlers.

#![allow(clippy::missing_errors_doc)]

use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::entity::{CreateRequest, Subscription, SubscriptionList, TotalRequest, TotalResponse};
use crate::error::StorageError;
use crate::traits::SubscriptionRepository;

/// Stateless orchestration over a [`SubscriptionRepository`].
#[derive(Clone)]
pub struct SubscriptionService {
    repo: Arc<dyn SubscriptionRepository>,
}

impl SubscriptionService {
    /// Creates a service over the given repository.
    #[must_use]
    pub fn new(repo: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repo }
    }

    /// Create a subscription.
    #[instrument(skip_all, fields(user_id = %req.user_id, service_name = %req.service_name))]
    pub async fn create(&self, req: CreateRequest) -> Result<Subscription, StorageError> {
        self.repo.add(req).await
    }

    /// Read one subscription.
    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Subscription, StorageError> {
        self.repo.get(id).await
    }

    /// Overwrite a subscription.
    #[instrument(skip_all, fields(id = %sub.id))]
    pub async fn update(&self, sub: Subscription) -> Result<Subscription, StorageError> {
        self.repo.update(sub).await
    }

    /// Delete a subscription.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), StorageError> {
        self.repo.delete(id).await
    }

    /// List all subscriptions.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<SubscriptionList, StorageError> {
        self.repo.list().await
    }

    /// Sum and count subscriptions matching the filters.
    #[instrument(skip_all, fields(user_id = %req.user_id))]
    pub async fn total(&self, req: TotalRequest) -> Result<TotalResponse, StorageError> {
        self.repo.total(req).await
    }
}

impl std::fmt::Debug for SubscriptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionService").finish_non_exhaustive()
    }
}
