//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by status
//! - `gateway_request_duration_seconds` (histogram): end-to-end latency
//! - `gateway_stage_duration_seconds` (histogram): per stage (fetch, detect, transform)
//! - `gateway_bytes_total` (counter): bytes in/out by direction
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(status: u16, started: Instant) {
    metrics::counter!("gateway_requests_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("gateway_request_duration_seconds")
        .record(started.elapsed().as_secs_f64());
}

/// Record the duration of one pipeline stage.
pub fn record_stage(stage: &'static str, elapsed: Duration) {
    metrics::histogram!("gateway_stage_duration_seconds", "stage" => stage)
        .record(elapsed.as_secs_f64());
}

/// Record input and output sizes of a transformed image.
pub fn record_bytes(input: usize, output: usize) {
    metrics::counter!("gateway_bytes_total", "direction" => "in").increment(input as u64);
    metrics::counter!("gateway_bytes_total", "direction" => "out").increment(output as u64);
}
