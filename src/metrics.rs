//! Prometheus metrics for HTTP traffic.
//!
//! This module provides:
//! - Recorder installation and the handle backing `/actuator/prometheus`
//! - Per-request counters and latency histograms labelled by route template

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::error::Result;

// === Metric Name Constants ===

/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Path label used for requests that matched no route.
pub const UNMATCHED_PATH: &str = "<unmatched>";

/// Install the global Prometheus recorder and register metric descriptions.
/// Call this once at startup; a second call fails because a recorder is already set.
pub fn init_metrics() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    describe_metrics();
    debug!("Metrics initialized");
    Ok(handle)
}

/// Build a handle backed by a recorder that is not installed globally.
/// Renders an empty exposition.
#[cfg(test)]
pub(crate) fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

fn describe_metrics() {
    describe_counter!(
        METRIC_HTTP_REQUESTS,
        "Total number of HTTP requests handled"
    );
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
}

/// Record one finished HTTP request.
pub fn record_http_request(start: Instant, method: String, path: String, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    let status = status.to_string();

    counter!(
        METRIC_HTTP_REQUESTS,
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);
    histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(latency_ms);
}

/// Middleware recording request count and latency for every request.
pub async fn track_http(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_PATH.to_owned());

    let response = next.run(req).await;

    record_http_request(start, method, path, response.status().as_u16());
    response
}
