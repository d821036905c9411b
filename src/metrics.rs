//! Prometheus metrics for the control plane.
//!
//! This module provides metrics for:
//! - Cluster placeholder requests
//! - Ingest job acceptance and rejection
//! - Job-status lookups
//! - HTTP request latency

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use tracing::debug;

// === Metric Name Constants ===

/// Cluster placeholder requests counter metric name.
pub const METRIC_CLUSTER_REQUESTS: &str = "cluster_requests_total";
/// Ingest jobs created counter metric name.
pub const METRIC_INGEST_JOBS_CREATED: &str = "ingest_jobs_created_total";
/// Ingest requests rejected counter metric name.
pub const METRIC_INGEST_REJECTED: &str = "ingest_rejected_total";
/// Job-status lookups counter metric name.
pub const METRIC_JOB_STATUS_LOOKUPS: &str = "job_status_lookups_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_CLUSTER_REQUESTS,
        "Total number of clustering placeholder requests received"
    );
    describe_counter!(
        METRIC_INGEST_JOBS_CREATED,
        "Total number of ingest jobs accepted"
    );
    describe_counter!(
        METRIC_INGEST_REJECTED,
        "Total number of ingest requests rejected by validation"
    );
    describe_counter!(
        METRIC_JOB_STATUS_LOOKUPS,
        "Total number of job-status lookups, labelled by result"
    );
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Increment the cluster placeholder request counter.
pub fn inc_cluster_requests() {
    counter!(METRIC_CLUSTER_REQUESTS).increment(1);
}

/// Increment the ingest jobs created counter.
pub fn inc_ingest_jobs_created() {
    counter!(METRIC_INGEST_JOBS_CREATED).increment(1);
}

/// Increment the ingest rejected counter.
pub fn inc_ingest_rejected() {
    counter!(METRIC_INGEST_REJECTED).increment(1);
}

/// Increment the job-status lookup counter.
pub fn inc_job_status_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    counter!(METRIC_JOB_STATUS_LOOKUPS, "result" => result).increment(1);
}

/// Record HTTP request latency for an endpoint.
pub fn record_http_latency(start: Instant, endpoint: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint.to_string()).record(latency_ms);
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        histogram!(self.metric_name).record(latency_ms);
    }
}

/// Create a latency timer for the ingest path.
pub fn timer_ingest() -> LatencyTimer {
    LatencyTimer::new(METRIC_HTTP_REQUEST_LATENCY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = LatencyTimer::new("test_metric");
        sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed_ms();
        assert!(elapsed >= 9.0); // Allow some tolerance
        // Timer will record on drop
    }
}
