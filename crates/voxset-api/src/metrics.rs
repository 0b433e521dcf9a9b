//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "voxset_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "voxset_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "voxset_http_requests_in_flight";

    // Pipeline metrics
    pub const JOBS_COMPLETED_TOTAL: &str = "voxset_jobs_completed_total";
    pub const JOBS_FAILED_TOTAL: &str = "voxset_jobs_failed_total";
    pub const DOWNLOAD_DURATION_SECONDS: &str = "voxset_download_duration_seconds";
    pub const PIPELINE_DURATION_SECONDS: &str = "voxset_pipeline_duration_seconds";
    pub const SEGMENTS_WRITTEN_TOTAL: &str = "voxset_segments_written_total";

    // Rate limiting metrics
    pub const RATE_LIMIT_HITS_TOTAL: &str = "voxset_rate_limit_hits_total";
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

/// Record a completed pipeline job.
pub fn record_job_completed(language: &str) {
    let labels = [("language", language.to_string())];
    counter!(names::JOBS_COMPLETED_TOTAL, &labels).increment(1);
}

/// Record a failed pipeline job.
pub fn record_job_failed(language: &str) {
    let labels = [("language", language.to_string())];
    counter!(names::JOBS_FAILED_TOTAL, &labels).increment(1);
}

/// Record download duration.
pub fn record_download_duration(duration_secs: f64) {
    histogram!(names::DOWNLOAD_DURATION_SECONDS).record(duration_secs);
}

/// Record end-to-end pipeline duration.
pub fn record_pipeline_duration(duration_secs: f64) {
    histogram!(names::PIPELINE_DURATION_SECONDS).record(duration_secs);
}

/// Record segment artifacts written.
pub fn record_segments_written(language: &str, count: u64) {
    let labels = [("language", language.to_string())];
    counter!(names::SEGMENTS_WRITTEN_TOTAL, &labels).increment(count);
}

/// Record rate limit hit.
pub fn record_rate_limit_hit(endpoint: &str) {
    let labels = [("endpoint", sanitize_path(endpoint))];
    counter!(names::RATE_LIMIT_HITS_TOTAL, &labels).increment(1);
}

/// Sanitize path for metrics labels (collapse per-language listing paths).
fn sanitize_path(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("/files/") {
        if !rest.is_empty() {
            return "/files/:language".to_string();
        }
    }
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

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
