//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, caller-visible status, flavor
//! - `proxy_request_duration_seconds` (histogram): end-to-end latency
//! - `proxy_upstream_failures_total` (counter): transport failures by kind
//!
//! Recording is a no-op until `init_metrics` installs the Prometheus recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one completed request.
pub fn record_request(method: &str, status: u16, flavor: &str, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
        ("flavor", flavor.to_string()),
    ];
    metrics::counter!("proxy_requests_total", &labels).increment(1);

    let labels = [("method", method.to_string()), ("flavor", flavor.to_string())];
    metrics::histogram!("proxy_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record an outbound call that produced no usable response.
pub fn record_upstream_failure(kind: &'static str) {
    metrics::counter!("proxy_upstream_failures_total", "kind" => kind).increment(1);
}
