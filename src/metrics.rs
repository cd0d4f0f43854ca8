//! Process-wide metrics recording and Prometheus exposition.
//!
//! The recorder is installed once at startup and its [`PrometheusHandle`]
//! is carried in application state so the `/metrics` handler renders from
//! an explicit handle rather than a hidden global. Counters and histograms
//! are updated through the helpers below; the `metrics` crate guarantees
//! atomic increments under concurrent requests.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// Content type for the Prometheus text exposition format.
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Total HTTP requests, labeled by method and endpoint.
pub const REQUEST_COUNT: &str = "app_http_requests_total";

/// Request latency histogram in seconds, labeled by endpoint.
pub const REQUEST_LATENCY: &str = "app_request_latency_seconds";

/// Total successful database writes.
pub const DB_WRITES: &str = "app_db_writes_total";

/// Latency buckets in seconds, matching the Prometheus client defaults.
const LATENCY_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Prometheus builder with the latency histogram buckets applied.
fn configured_builder() -> Result<PrometheusBuilder, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(REQUEST_LATENCY.to_string()), LATENCY_BUCKETS)
}

/// Install the process-wide recorder and describe the metric families.
///
/// Must be called once at startup, before any metric is recorded. The
/// returned handle renders the exposition text for `/metrics`.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = configured_builder()?.install_recorder()?;

    describe_counter!(REQUEST_COUNT, "Total HTTP requests");
    describe_histogram!(REQUEST_LATENCY, "Request latency in seconds");
    describe_counter!(DB_WRITES, "Total database write operations");

    Ok(handle)
}

/// Count one handled request on an endpoint.
pub fn record_request(method: &'static str, endpoint: &'static str) {
    counter!(REQUEST_COUNT, "method" => method, "endpoint" => endpoint).increment(1);
}

/// Count one successful database write.
pub fn record_db_write() {
    counter!(DB_WRITES).increment(1);
}

/// Observe the wall-clock seconds a write request spent from connection
/// acquisition through insert completion.
pub fn observe_request_latency(endpoint: &'static str, seconds: f64) {
    histogram!(REQUEST_LATENCY, "endpoint" => endpoint).record(seconds);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Render exposition text after running `f` against a fresh recorder.
    fn render_with_recorder(f: impl FnOnce()) -> String {
        let recorder = configured_builder().unwrap().build_recorder();
        let handle = recorder.handle();
        metrics::with_local_recorder(&recorder, f);
        handle.render()
    }

    #[test]
    fn test_request_count_carries_method_and_endpoint_labels() {
        let text = render_with_recorder(|| {
            record_request("GET", "/");
        });

        let line = text
            .lines()
            .find(|l| l.starts_with(&format!("{REQUEST_COUNT}{{")))
            .expect("request counter not rendered");
        assert!(line.contains(r#"method="GET""#));
        assert!(line.contains(r#"endpoint="/""#));
        assert!(line.ends_with(" 1"));
    }

    #[test]
    fn test_request_count_increments_once_per_call() {
        let text = render_with_recorder(|| {
            record_request("GET", "/write");
            record_request("GET", "/write");
            record_request("GET", "/write");
        });

        let line = text
            .lines()
            .find(|l| l.starts_with(&format!("{REQUEST_COUNT}{{")))
            .expect("request counter not rendered");
        assert!(line.ends_with(" 3"));
    }

    #[test]
    fn test_db_writes_renders_as_total_counter() {
        let text = render_with_recorder(|| {
            record_db_write();
            record_db_write();
            record_db_write();
        });

        assert!(text.contains("app_db_writes_total 3"));
    }

    #[test]
    fn test_latency_renders_as_histogram_with_buckets() {
        let text = render_with_recorder(|| {
            observe_request_latency("/write", 0.042);
        });

        assert!(text.contains(&format!("{REQUEST_LATENCY}_bucket")));
        assert!(text.contains(&format!("{REQUEST_LATENCY}_sum")));
        assert!(text.contains(&format!("{REQUEST_LATENCY}_count")));
        assert!(text.contains(r#"endpoint="/write""#));
        // 0.042 falls in the 0.05 bucket and every wider one.
        assert!(text.contains(r#"le="0.05""#));
    }

    #[test]
    fn test_untouched_families_are_absent_until_recorded() {
        let text = render_with_recorder(|| {
            record_request("GET", "/");
        });

        assert!(!text.contains(DB_WRITES));
        assert!(!text.contains(&format!("{REQUEST_LATENCY}_count")));
    }
}
