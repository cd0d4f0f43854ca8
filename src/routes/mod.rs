//! HTTP route handlers.
//!
//! Three endpoints, dispatched by exact path: the liveness probe at `/`,
//! the database write at `/write`, and the Prometheus exposition at
//! `/metrics`. Request tracing is enabled via middleware that generates a
//! unique request ID for each incoming request, allowing correlation of
//! all logs within a request.

pub mod health;
pub mod metrics;
pub mod write;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health))
        .route("/write", get(write::write))
        .route("/metrics", get(metrics::metrics))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
