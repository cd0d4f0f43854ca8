//! The write endpoint: one row inserted per request.
//!
//! Opens a fresh database connection, inserts a single hit with default
//! values, and closes the connection. Metrics are recorded only after the
//! insert has succeeded, so a failed request leaves the write counter and
//! latency histogram untouched.

use std::time::Instant;

use axum::extract::State;
use sqlx::Connection;

use crate::db;
use crate::error::AppError;
use crate::metrics;
use crate::state::AppState;

/// Write handler.
///
/// Latency is measured from connection acquisition through insert
/// completion. Connection-retry exhaustion surfaces as 503, a failed
/// insert as 500.
pub async fn write(State(state): State<AppState>) -> Result<&'static str, AppError> {
    let start = Instant::now();

    let mut conn = db::acquire_connection(&state.config.database).await?;
    db::insert_hit(&mut conn).await?;
    conn.close().await?;

    metrics::record_db_write();
    metrics::record_request("GET", "/write");
    metrics::observe_request_latency("/write", start.elapsed().as_secs_f64());

    Ok("Database write successful\n")
}
