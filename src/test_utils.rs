//! Test utilities and mock factories.
//!
//! This module provides shared testing infrastructure:
//! - Mock repository factories
//! - Subscription fixtures
//!
//! Only compiled for tests (`#[cfg(test)]`).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use uuid::Uuid;

use crate::entity::{DateValue, Subscription};
use crate::error::StorageError;
use crate::traits::MockSubscriptionRepository;

/// A fully populated subscription with fixed field values.
#[must_use]
pub fn sample_subscription() -> Subscription {
    Subscription {
        id: Uuid::parse_str("2f1c3b7e-9a4d-4c5e-8f6a-1b2c3d4e5f60").unwrap(),
        user_id: Uuid::parse_str("60601fee-2bf1-4721-ae6f-7636e79a0cba").unwrap(),
        start_date: DateValue::from_ymd(2025, 7, 1).unwrap(),
        finish_date: None,
        service_name: "Yandex Plus".to_string(),
        price: 400,
    }
}

/// Create a mock repository whose every operation fails with `error`.
#[must_use]
pub fn mock_repo_error(error: StorageError) -> MockSubscriptionRepository {
    let mut mock = MockSubscriptionRepository::new();
    let e = error.clone();
    mock.expect_add().returning(move |_| Err(e.clone()));
    let e = error.clone();
    mock.expect_get().returning(move |_| Err(e.clone()));
    let e = error.clone();
    mock.expect_update().returning(move |_| Err(e.clone()));
    let e = error.clone();
    mock.expect_delete().returning(move |_| Err(e.clone()));
    let e = error.clone();
    mock.expect_list().returning(move || Err(e.clone()));
    mock.expect_total().returning(move |_| Err(error.clone()));
    mock
}

/// Create a mock repository that finds nothing for id-based operations.
#[must_use]
pub fn mock_repo_not_found() -> MockSubscriptionRepository {
    let mut mock = MockSubscriptionRepository::new();
    mock.expect_get()
        .returning(|id| Err(StorageError::SubscriptionNotFound { id: id.to_string() }));
    mock.expect_update().returning(|sub| {
        Err(StorageError::SubscriptionNotFound {
            id: sub.id.to_string(),
        })
    });
    mock.expect_delete()
        .returning(|id| Err(StorageError::SubscriptionNotFound { id: id.to_string() }));
    mock
}

/// Create a mock repository holding exactly one subscription.
#[must_use]
pub fn mock_repo_with(sub: Subscription) -> MockSubscriptionRepository {
    let mut mock = MockSubscriptionRepository::new();
    let stored = sub.clone();
    mock.expect_get().returning(move |id| {
        if id == stored.id {
            Ok(stored.clone())
        } else {
            Err(StorageError::SubscriptionNotFound { id: id.to_string() })
        }
    });
    let stored = sub.clone();
    mock.expect_list()
        .returning(move || Ok(vec![stored.clone()].into()));
    let stored = sub;
    mock.expect_delete().returning(move |id| {
        if id == stored.id {
            Ok(())
        } else {
            Err(StorageError::SubscriptionNotFound { id: id.to_string() })
        }
    });
    mock
}
