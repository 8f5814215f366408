//! Prometheus metrics for the API server.

use std::sync::LazyLock;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use regex_lite::Regex;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "vgen_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "vgen_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "vgen_http_requests_in_flight";

    // Job metrics
    pub const JOBS_SUBMITTED_TOTAL: &str = "vgen_jobs_submitted_total";
    pub const UPLOAD_BYTES_TOTAL: &str = "vgen_upload_bytes_total";

    // Simulation metrics
    pub const SIMULATIONS_IN_FLIGHT: &str = "vgen_simulations_in_flight";
    pub const SIMULATIONS_COMPLETED_TOTAL: &str = "vgen_simulations_completed_total";
    pub const SIMULATIONS_FAILED_TOTAL: &str = "vgen_simulations_failed_total";
    pub const SIMULATION_DURATION_SECONDS: &str = "vgen_simulation_duration_seconds";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record an accepted generation request.
pub fn record_job_submitted(kind: &str) {
    let labels = [("kind", kind.to_string())];
    counter!(names::JOBS_SUBMITTED_TOTAL, &labels).increment(1);
}

/// Record bytes written for an uploaded image.
pub fn record_upload_bytes(bytes: usize) {
    counter!(names::UPLOAD_BYTES_TOTAL).increment(bytes as u64);
}

pub fn simulation_started() {
    gauge!(names::SIMULATIONS_IN_FLIGHT).increment(1.0);
}

pub fn simulation_finished() {
    gauge!(names::SIMULATIONS_IN_FLIGHT).decrement(1.0);
}

/// Record a job completed by the simulator.
pub fn record_simulation_completed(style: &str, duration_secs: f64) {
    let labels = [("style", style.to_string())];
    counter!(names::SIMULATIONS_COMPLETED_TOTAL, &labels).increment(1);
    histogram!(names::SIMULATION_DURATION_SECONDS).record(duration_secs);
}

/// Record a simulation whose store update never succeeded.
pub fn record_simulation_failed(reason: &str) {
    let labels = [("reason", reason.to_string())];
    counter!(names::SIMULATIONS_FAILED_TOTAL, &labels).increment(1);
}

static UUID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("valid uuid pattern")
});
static VIDEO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/video/[^/]+").expect("valid video pattern"));
static UPLOAD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/uploads/[^/]+").expect("valid upload pattern"));

/// Sanitize path for metrics labels (remove IDs, file names).
fn sanitize_path(path: &str) -> String {
    let path = UUID_RE.replace_all(path, ":id");
    let path = VIDEO_RE.replace_all(&path, "/video/:video_id");
    let path = UPLOAD_RE.replace_all(&path, "/uploads/:filename");
    path.to_string()
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);
    let response = next.run(request).await;
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    record_http_request(
        &method,
        &path,
        response.status().as_u16(),
        start.elapsed().as_secs_f64(),
    );

    response
}
