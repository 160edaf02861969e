//! Filtered cost totals.
//!
//! [`TotalQuery`] turns a [`TotalRequest`] into one `SUM`/`COUNT` statement.
//! Every predicate owns exactly one numbered parameter (`?1`, `?2`, ...)
//! assigned in the order the predicates are appended, so the SQL text never
//! contains a request value.

#![allow(clippy::missing_errors_doc)]

use uuid::Uuid;

use crate::entity::{DateValue, TotalRequest, TotalResponse};
use crate::error::StorageError;

use super::core::SqliteStorage;

const TOTAL_SELECT: &str =
    "SELECT COALESCE(SUM(price), 0) AS total, COUNT(id) AS count FROM subscriptions";

/// A value bound to one positional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// A UUID column value.
    Uuid(Uuid),
    /// A text column value.
    Text(String),
    /// A date column value.
    Date(DateValue),
}

impl QueryValue {
    /// The value in the form it is stored in.
    #[must_use]
    pub fn to_bind(&self) -> Option<String> {
        match self {
            Self::Uuid(id) => Some(id.to_string()),
            Self::Text(text) => Some(text.clone()),
            Self::Date(date) => date.to_storage(),
        }
    }
}

/// Aggregate query over `subscriptions` built from optional filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalQuery {
    predicates: Vec<String>,
    params: Vec<QueryValue>,
}

impl TotalQuery {
    /// Starts a query with the mandatory `user_id` predicate.
    #[must_use]
    pub fn new(user_id: Uuid) -> Self {
        let mut query = Self {
            predicates: Vec::new(),
            params: Vec::new(),
        };
        query.push("user_id =", QueryValue::Uuid(user_id));
        query
    }

    /// Builds the query for a request, skipping every unset filter.
    #[must_use]
    pub fn from_request(req: &TotalRequest) -> Self {
        Self::new(req.user_id)
            .service_name(&req.service_name)
            .starting_on_or_after(req.start_date)
            .finishing_on_or_before(req.finish_date)
    }

    /// Narrows to one service. An empty name adds nothing.
    #[must_use]
    pub fn service_name(mut self, service_name: &str) -> Self {
        if !service_name.is_empty() {
            self.push("service_name =", QueryValue::Text(service_name.to_string()));
        }
        self
    }

    /// Narrows to subscriptions whose `start_date` is on or after `date`.
    /// `None` and the absent date add nothing.
    #[must_use]
    pub fn starting_on_or_after(mut self, date: Option<DateValue>) -> Self {
        if let Some(date) = date.filter(|d| !d.is_absent()) {
            self.push("start_date >=", QueryValue::Date(date));
        }
        self
    }

    /// Narrows to subscriptions whose `finish_date` is on or before `date`.
    /// `None` and the absent date add nothing.
    #[must_use]
    pub fn finishing_on_or_before(mut self, date: Option<DateValue>) -> Self {
        if let Some(date) = date.filter(|d| !d.is_absent()) {
            self.push("finish_date <=", QueryValue::Date(date));
        }
        self
    }

    fn push(&mut self, column_op: &str, value: QueryValue) {
        self.params.push(value);
        self.predicates
            .push(format!("{column_op} ?{}", self.params.len()));
    }

    /// The predicates in append order.
    #[must_use]
    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    /// The bound values; `params()[i]` belongs to parameter `?{i + 1}`.
    #[must_use]
    pub fn params(&self) -> &[QueryValue] {
        &self.params
    }

    /// The full statement text.
    #[must_use]
    pub fn sql(&self) -> String {
        format!("{TOTAL_SELECT} WHERE {}", self.predicates.join(" AND "))
    }
}

impl SqliteStorage {
    /// Sum prices and count subscriptions matching the request.
    ///
    /// No matching rows gives `total = 0, count = 0`.
    pub async fn total_cost(&self, req: &TotalRequest) -> Result<TotalResponse, StorageError> {
        let query = TotalQuery::from_request(req);
        let sql = query.sql();
        tracing::debug!(sql = %sql, params = query.params().len(), "Running total query");

        let mut statement = sqlx::query(&sql);
        for value in query.params() {
            statement = statement.bind(value.to_bind());
        }

        let row = statement
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::query_error("SELECT total", format!("{e}")))?;

        let total: i64 = sqlx::Row::try_get(&row, "total")
            .map_err(|e| Self::query_error("SELECT total", format!("{e}")))?;
        let count: i64 = sqlx::Row::try_get(&row, "count")
            .map_err(|e| Self::query_error("SELECT total", format!("{e}")))?;

        Ok(TotalResponse {
            user_id: req.user_id,
            service_name: req.service_name.clone(),
            total: Self::non_negative("total", total)?,
            count: Self::non_negative("count", count)?,
        })
    }

    fn non_negative(column: &str, value: i64) -> Result<u64, StorageError> {
        u64::try_from(value).map_err(|_| StorageError::Internal {
            message: format!("Aggregate {column} is negative: {value}"),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::entity::CreateRequest;
    use crate::storage::core::tests::test_storage;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    fn date(year: i32, month: u32, day: u32) -> DateValue {
        DateValue::from_ymd(year, month, day).unwrap()
    }

    // ========== Builder ==========

    #[test]
    fn test_user_only() {
        let user_id = Uuid::new_v4();
        let query = TotalQuery::from_request(&TotalRequest::for_user(user_id));

        assert_eq!(
            query.sql(),
            "SELECT COALESCE(SUM(price), 0) AS total, COUNT(id) AS count FROM subscriptions \
             WHERE user_id = ?1"
        );
        assert_eq!(query.params(), &[QueryValue::Uuid(user_id)]);
    }

    #[test]
    fn test_all_filters_numbered_in_order() {
        let user_id = Uuid::new_v4();
        let req = TotalRequest::for_user(user_id)
            .with_service_name("Netflix")
            .with_start_date(date(2024, 1, 1))
            .with_finish_date(date(2024, 12, 31));
        let query = TotalQuery::from_request(&req);

        assert_eq!(
            query.predicates(),
            &[
                "user_id = ?1".to_string(),
                "service_name = ?2".to_string(),
                "start_date >= ?3".to_string(),
                "finish_date <= ?4".to_string(),
            ]
        );
        assert_eq!(
            query.params(),
            &[
                QueryValue::Uuid(user_id),
                QueryValue::Text("Netflix".to_string()),
                QueryValue::Date(date(2024, 1, 1)),
                QueryValue::Date(date(2024, 12, 31)),
            ]
        );
        assert!(query.sql().ends_with(
            "WHERE user_id = ?1 AND service_name = ?2 AND start_date >= ?3 AND finish_date <= ?4"
        ));
    }

    #[test]
    fn test_numbering_skips_unset_filters() {
        let req = TotalRequest::for_user(Uuid::nil()).with_finish_date(date(2024, 6, 30));
        let query = TotalQuery::from_request(&req);

        assert_eq!(
            query.predicates(),
            &["user_id = ?1".to_string(), "finish_date <= ?2".to_string()]
        );
        assert_eq!(query.params().len(), 2);
    }

    #[test]
    fn test_absent_dates_are_skipped() {
        let req = TotalRequest::for_user(Uuid::nil())
            .with_start_date(DateValue::ABSENT)
            .with_finish_date(DateValue::ABSENT);
        let query = TotalQuery::from_request(&req);

        assert_eq!(query.predicates(), &["user_id = ?1".to_string()]);
    }

    #[test]
    fn test_empty_service_name_is_skipped() {
        let query = TotalQuery::new(Uuid::nil()).service_name("");
        assert_eq!(query.params().len(), 1);
    }

    #[test]
    fn test_values_never_in_sql() {
        let req = TotalRequest::for_user(Uuid::nil()).with_service_name("x' OR '1'='1");
        let query = TotalQuery::from_request(&req);

        assert!(!query.sql().contains("OR '1'='1"));
        assert_eq!(
            query.params()[1],
            QueryValue::Text("x' OR '1'='1".to_string())
        );
    }

    #[test]
    fn test_query_value_to_bind() {
        assert_eq!(
            QueryValue::Uuid(Uuid::nil()).to_bind().as_deref(),
            Some("00000000-0000-0000-0000-000000000000")
        );
        assert_eq!(
            QueryValue::Date(date(2024, 3, 15)).to_bind().as_deref(),
            Some("2024-03-15")
        );
        assert_eq!(QueryValue::Date(DateValue::ABSENT).to_bind(), None);
    }

    // ========== Execution ==========

    async fn seed(
        storage: &SqliteStorage,
        user_id: Uuid,
        service_name: &str,
        price: u32,
        start: DateValue,
        finish: Option<DateValue>,
    ) {
        storage
            .add_subscription(&CreateRequest {
                user_id,
                start_date: start,
                finish_date: finish,
                service_name: service_name.to_string(),
                price,
            })
            .await
            .expect("seed subscription");
    }

    #[tokio::test]
    #[serial]
    async fn test_total_user_only() {
        let storage = test_storage().await;
        let user_id = Uuid::new_v4();
        seed(&storage, user_id, "Netflix", 1000, date(2024, 1, 1), None).await;
        seed(&storage, user_id, "Spotify", 2500, date(2024, 2, 1), None).await;
        seed(&storage, Uuid::new_v4(), "Netflix", 9999, date(2024, 1, 1), None).await;

        let resp = storage
            .total_cost(&TotalRequest::for_user(user_id))
            .await
            .unwrap();

        assert_eq!(
            resp,
            TotalResponse {
                user_id,
                service_name: String::new(),
                total: 3500,
                count: 2,
            }
        );
    }

    #[tokio::test]
    #[serial]
    async fn test_total_no_rows() {
        let storage = test_storage().await;
        let resp = storage
            .total_cost(&TotalRequest::for_user(Uuid::new_v4()))
            .await
            .unwrap();

        assert_eq!(resp.total, 0);
        assert_eq!(resp.count, 0);
    }

    #[tokio::test]
    #[serial]
    async fn test_total_by_service_name() {
        let storage = test_storage().await;
        let user_id = Uuid::new_v4();
        seed(&storage, user_id, "Netflix", 1000, date(2024, 1, 1), None).await;
        seed(&storage, user_id, "Netflix", 1200, date(2024, 6, 1), None).await;
        seed(&storage, user_id, "Spotify", 2500, date(2024, 2, 1), None).await;

        let req = TotalRequest::for_user(user_id).with_service_name("Netflix");
        let resp = storage.total_cost(&req).await.unwrap();

        assert_eq!(resp.service_name, "Netflix");
        assert_eq!(resp.total, 2200);
        assert_eq!(resp.count, 2);
    }

    #[tokio::test]
    #[serial]
    async fn test_total_start_bound_is_inclusive() {
        let storage = test_storage().await;
        let user_id = Uuid::new_v4();
        seed(&storage, user_id, "Netflix", 100, date(2023, 12, 1), None).await;
        seed(&storage, user_id, "Netflix", 200, date(2024, 1, 1), None).await;
        seed(&storage, user_id, "Netflix", 400, date(2024, 3, 1), None).await;

        let req = TotalRequest::for_user(user_id).with_start_date(date(2024, 1, 1));
        let resp = storage.total_cost(&req).await.unwrap();

        assert_eq!(resp.total, 600);
        assert_eq!(resp.count, 2);
    }

    #[tokio::test]
    #[serial]
    async fn test_total_finish_bound_excludes_open_ended() {
        let storage = test_storage().await;
        let user_id = Uuid::new_v4();
        let start = date(2024, 1, 1);
        seed(&storage, user_id, "Netflix", 100, start, Some(date(2024, 6, 30))).await;
        seed(&storage, user_id, "Netflix", 200, start, Some(date(2024, 7, 31))).await;
        seed(&storage, user_id, "Netflix", 400, start, None).await;

        let req = TotalRequest::for_user(user_id).with_finish_date(date(2024, 6, 30));
        let resp = storage.total_cost(&req).await.unwrap();

        assert_eq!(resp.total, 100);
        assert_eq!(resp.count, 1);
    }

    #[tokio::test]
    #[serial]
    async fn test_total_absent_dates_do_not_filter() {
        let storage = test_storage().await;
        let user_id = Uuid::new_v4();
        seed(&storage, user_id, "Netflix", 100, date(2024, 1, 1), None).await;

        let req = TotalRequest::for_user(user_id)
            .with_start_date(DateValue::ABSENT)
            .with_finish_date(DateValue::ABSENT);
        let resp = storage.total_cost(&req).await.unwrap();

        assert_eq!(resp.count, 1);
    }
}
