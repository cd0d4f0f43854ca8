//! Health check endpoint for container orchestration.
//!
//! Provides a simple liveness probe that returns 200 OK when the process is
//! running. Used by Kubernetes, ECS, systemd, and load balancers to verify
//! the service is alive.

use crate::metrics;

/// Health check handler.
///
/// Returns a fixed plain-text body to indicate the service is running and
/// counts the request. This is a liveness probe - it only checks that the
/// process can respond to HTTP.
pub async fn health() -> &'static str {
    metrics::record_request("GET", "/");
    "Application is running\n"
}
