//! hitlog: a minimal hit-logging HTTP service.
//!
//! Serves a liveness probe at `/`, records one database row per request to
//! `/write`, and exposes Prometheus-format metrics at `/metrics`. The
//! library surface exists so integration tests can drive the router and
//! the database layer directly.

pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
