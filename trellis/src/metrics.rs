//! Client observability metrics
//!
//! Prometheus-compatible metrics for request execution and topology
//! discovery. Recording is a no-op until the application installs a
//! `metrics` recorder.

use std::time::{Duration, Instant};

/// Record a completed logical request
pub fn record_request(method: &str, status: &str, duration: Duration) {
    metrics::counter!(
        "trellis_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);

    metrics::histogram!(
        "trellis_request_duration_seconds",
        "method" => method.to_string(),
    )
    .record(duration.as_secs_f64());
}

/// Record a failed physical attempt
pub fn record_attempt_failure(kind: &str, server: &str) {
    metrics::counter!(
        "trellis_attempt_failures_total",
        "kind" => kind.to_string(),
        "server" => server.to_string(),
    )
    .increment(1);
}

/// Record a retry granted by the retry policy
pub fn record_retry(kind: &str) {
    metrics::counter!(
        "trellis_retries_total",
        "kind" => kind.to_string(),
    )
    .increment(1);
}

/// Record the outcome of one discovery iteration
pub fn record_discovery_run(outcome: &str) {
    metrics::counter!(
        "trellis_discovery_runs_total",
        "outcome" => outcome.to_string(),
    )
    .increment(1);
}

/// Update the server pool size gauge
pub fn record_pool_size(size: usize) {
    metrics::gauge!("trellis_pool_size").set(size as f64);
}

/// Guard for timing a logical request
pub struct RequestTimer {
    method: String,
    start: Instant,
}

impl RequestTimer {
    /// Start timing a request
    pub fn new(method: &str) -> Self {
        Self {
            method: method.to_string(),
            start: Instant::now(),
        }
    }

    /// Record a delivered response (succeeded or not)
    pub fn success(self, succeeded: bool) {
        let status = if succeeded { "ok" } else { "failed" };
        record_request(&self.method, status, self.start.elapsed());
    }

    /// Record a request that ended in an error
    pub fn error(self, error_type: &str) {
        record_request(&self.method, error_type, self.start.elapsed());
    }
}
