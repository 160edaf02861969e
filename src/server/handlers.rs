//! REST API handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::entity::{CreateRequest, Subscription, SubscriptionList, TotalRequest, TotalResponse};

use super::error::{ApiError, ApiResult};
use super::types::AppState;

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `healthy`.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}

fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid ID format: {raw}")))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /api/v1/subscription
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Subscription>)> {
    let Json(req) = payload?;
    let sub = state.subscriptions.create(req).await?;
    Ok((StatusCode::CREATED, Json(sub)))
}

/// GET /api/v1/subscription/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Subscription>> {
    let id = parse_id(&id)?;
    Ok(Json(state.subscriptions.get(id).await?))
}

/// PUT /api/v1/subscription
pub async fn update(
    State(state): State<AppState>,
    payload: Result<Json<Subscription>, JsonRejection>,
) -> ApiResult<Json<Subscription>> {
    let Json(sub) = payload?;
    Ok(Json(state.subscriptions.update(sub).await?))
}

/// DELETE /api/v1/subscription/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state.subscriptions.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/subscription
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<SubscriptionList>> {
    Ok(Json(state.subscriptions.list().await?))
}

/// GET /api/v1/subscription/total
///
/// Filters arrive as a JSON body.
pub async fn total(
    State(state): State<AppState>,
    payload: Result<Json<TotalRequest>, JsonRejection>,
) -> ApiResult<Json<TotalResponse>> {
    let Json(req) = payload?;
    Ok(Json(state.subscriptions.total(req).await?))
}
