//! Route table.

use axum::routing::get;
use axum::Router;

use super::handlers;
use super::types::AppState;

/// Prefix of every subscription route.
pub const API_PREFIX: &str = "/api/v1/subscription";

/// Build the HTTP router.
///
/// `/total` is a static segment, so it wins over the `{id}` capture.
pub fn build_router(state: AppState) -> Router {
    let api_v1 = Router::new()
        .route(
            API_PREFIX,
            get(handlers::list)
                .post(handlers::create)
                .put(handlers::update),
        )
        .route(&format!("{API_PREFIX}/total"), get(handlers::total))
        .route(
            &format!("{API_PREFIX}/{{id}}"),
            get(handlers::get).delete(handlers::delete),
        );

    let health_routes = Router::new().route("/health", get(handlers::health));

    Router::new()
        .merge(api_v1)
        .merge(health_routes)
        .with_state(state)
}
