pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /health                 liveness (GET)
/// /health/smtp            relay configuration + connectivity (GET)
/// /order                  submit an order (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .route("/order", post(handlers::order::submit_order))
}
