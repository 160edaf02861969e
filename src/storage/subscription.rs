//! Subscription CRUD operations.

#![allow(clippy::missing_errors_doc)]

use uuid::Uuid;

use crate::entity::{optional_to_storage, CreateRequest, Subscription, SubscriptionList};
use crate::error::StorageError;

use super::core::{SqliteStorage, SUBSCRIPTION_COLUMNS};

impl SqliteStorage {
    /// Insert a subscription and return the stored row with its new id.
    pub async fn add_subscription(
        &self,
        req: &CreateRequest,
    ) -> Result<Subscription, StorageError> {
        let id = Uuid::new_v4();

        let row = sqlx::query(&format!(
            "INSERT INTO subscriptions (id, user_id, start_date, finish_date, service_name, price)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING {SUBSCRIPTION_COLUMNS}"
        ))
        .bind(id.to_string())
        .bind(req.user_id.to_string())
        .bind(req.start_date.to_storage())
        .bind(optional_to_storage(req.finish_date))
        .bind(&req.service_name)
        .bind(i64::from(req.price))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::query_error("INSERT subscriptions", format!("{e}")))?;

        let sub = Self::subscription_from_row(&row)?;
        tracing::debug!(id = %sub.id, user_id = %sub.user_id, "Subscription created");
        Ok(sub)
    }

    /// Get a subscription by id.
    ///
    /// Returns [`StorageError::SubscriptionNotFound`] if no row matches.
    pub async fn get_subscription(&self, id: Uuid) -> Result<Subscription, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::query_error("SELECT subscriptions", format!("{e}")))?;

        match row {
            Some(row) => Self::subscription_from_row(&row),
            None => Err(StorageError::SubscriptionNotFound { id: id.to_string() }),
        }
    }

    /// Replace every field of an existing subscription.
    ///
    /// Returns [`StorageError::SubscriptionNotFound`] if `sub.id` does not exist.
    pub async fn update_subscription(
        &self,
        sub: &Subscription,
    ) -> Result<Subscription, StorageError> {
        let row = sqlx::query(&format!(
            "UPDATE subscriptions
             SET user_id = ?, start_date = ?, finish_date = ?, service_name = ?, price = ?
             WHERE id = ?
             RETURNING {SUBSCRIPTION_COLUMNS}"
        ))
        .bind(sub.user_id.to_string())
        .bind(sub.start_date.to_storage())
        .bind(optional_to_storage(sub.finish_date))
        .bind(&sub.service_name)
        .bind(i64::from(sub.price))
        .bind(sub.id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::query_error("UPDATE subscriptions", format!("{e}")))?;

        match row {
            Some(row) => Self::subscription_from_row(&row),
            None => Err(StorageError::SubscriptionNotFound {
                id: sub.id.to_string(),
            }),
        }
    }

    /// Delete a subscription.
    ///
    /// Returns [`StorageError::SubscriptionNotFound`] if nothing was deleted.
    pub async fn delete_subscription(&self, id: Uuid) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| Self::query_error("DELETE subscriptions", format!("{e}")))?;

        if result.rows_affected() == 0 {
            tracing::debug!(%id, "No subscription to delete");
            return Err(StorageError::SubscriptionNotFound { id: id.to_string() });
        }

        Ok(())
    }

    /// List every stored subscription.
    pub async fn list_subscriptions(&self) -> Result<SubscriptionList, StorageError> {
        let rows = sqlx::query(&format!("SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Self::query_error("SELECT subscriptions", format!("{e}")))?;

        rows.iter()
            .map(Self::subscription_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map(SubscriptionList::from)
    }
}
