//! Store metrics collection.

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Store operation latency in seconds by operation.
    pub const LATENCY_SECONDS: &str = "vgen_store_latency_seconds";

    /// Total retry attempts by operation.
    pub const RETRIES_TOTAL: &str = "vgen_store_retries_total";
}

/// Record the latency of a store operation.
pub fn record_operation(operation: &str, latency_secs: f64) {
    histogram!(
        names::LATENCY_SECONDS,
        "operation" => operation.to_string()
    )
    .record(latency_secs);
}

/// Record a retry attempt.
pub fn record_retry(operation: &str) {
    counter!(
        names::RETRIES_TOTAL,
        "operation" => operation.to_string()
    )
    .increment(1);
}
