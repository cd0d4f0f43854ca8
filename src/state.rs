//! Shared application state for request handlers.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::AppConfig;

/// Shared application state, cloneable across handlers.
///
/// Contains the application configuration and the handle to the installed
/// Prometheus recorder, which the `/metrics` handler renders from.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// Creates a new application state from the configuration and the
    /// Prometheus recorder handle.
    pub fn new(config: AppConfig, metrics: PrometheusHandle) -> Self {
        Self {
            config: Arc::new(config),
            metrics,
        }
    }
}
