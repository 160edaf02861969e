//! Subscription entities and request/response shapes.
//!
//! These types are shared by the storage layer, the service and the HTTP
//! layer. Dates use [`DateValue`]; nullable dates are `Option<DateValue>`,
//! where both `None` and the absent date mean "no date".

mod date;

pub use date::{optional_to_storage, DateValue, DISPLAY_FORMAT, STORAGE_FORMAT};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Server-generated identifier.
    pub id: Uuid,
    /// Owner of the subscription.
    pub user_id: Uuid,
    /// First day the subscription is active.
    pub start_date: DateValue,
    /// Last day the subscription is active, if it ends.
    #[serde(default)]
    pub finish_date: Option<DateValue>,
    /// Name of the subscribed service.
    pub service_name: String,
    /// Price in whole currency units.
    pub price: u32,
}

impl Subscription {
    /// Builds a subscription from a create request and an assigned id.
    #[must_use]
    pub fn from_request(id: Uuid, req: CreateRequest) -> Self {
        Self {
            id,
            user_id: req.user_id,
            start_date: req.start_date,
            finish_date: req.finish_date,
            service_name: req.service_name,
            price: req.price,
        }
    }
}

/// Input for creating a subscription. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Owner of the subscription.
    pub user_id: Uuid,
    /// First day the subscription is active.
    pub start_date: DateValue,
    /// Last day the subscription is active, if it ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_date: Option<DateValue>,
    /// Name of the subscribed service.
    pub service_name: String,
    /// Price in whole currency units.
    pub price: u32,
}

/// Filters for the cost total.
///
/// `user_id` always applies. Every other filter narrows the result only when
/// set: a non-empty `service_name`, a present `start_date` (inclusive lower
/// bound on `start_date`), a present `finish_date` (inclusive upper bound on
/// `finish_date`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalRequest {
    /// Owner whose subscriptions are summed.
    pub user_id: Uuid,
    /// Exact service name to match; empty matches all.
    #[serde(default)]
    pub service_name: String,
    /// Only subscriptions starting on or after this date.
    #[serde(default)]
    pub start_date: Option<DateValue>,
    /// Only subscriptions finishing on or before this date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_date: Option<DateValue>,
}

impl TotalRequest {
    /// Creates a request filtered by user only.
    #[must_use]
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    /// Adds a service name filter.
    #[must_use]
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }

    /// Adds a lower bound on `start_date`.
    #[must_use]
    pub const fn with_start_date(mut self, date: DateValue) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Adds an upper bound on `finish_date`.
    #[must_use]
    pub const fn with_finish_date(mut self, date: DateValue) -> Self {
        self.finish_date = Some(date);
        self
    }
}

/// Sum and count of the subscriptions matching a [`TotalRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalResponse {
    /// Echo of the requested user.
    pub user_id: Uuid,
    /// Echo of the requested service name.
    pub service_name: String,
    /// Sum of matching prices, 0 when nothing matches.
    pub total: u64,
    /// Number of matching subscriptions.
    pub count: u64,
}

/// All stored subscriptions, in storage order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionList {
    /// The subscriptions. Empty, never missing, when the store is empty.
    pub subscriptions: Vec<Subscription>,
}

impl SubscriptionList {
    /// Number of subscriptions in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Returns true if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl From<Vec<Subscription>> for SubscriptionList {
    fn from(subscriptions: Vec<Subscription>) -> Self {
        Self { subscriptions }
    }
}
