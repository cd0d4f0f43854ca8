//! Prometheus exposition endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use http::header::CONTENT_TYPE;

use crate::metrics::PROMETHEUS_CONTENT_TYPE;
use crate::state::AppState;

/// Renders the current state of all recorded metrics in the Prometheus
/// text exposition format.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.metrics.render(),
    )
}
