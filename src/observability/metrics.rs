//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_dispatch_total` (counter): dispatches by method and whether
//!   any handler ran
//! - `router_dispatch_duration_seconds` (histogram): time spent in `listen`
//! - `router_handlers_invoked_total` (counter): handler invocations by
//!   entry method
//! - `router_emission_failures_total` (counter): replies that failed to
//!   serialize
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; with no recorder installed
//!   every call is a no-op, so the router works the same in tests
//! - Prometheus exposition is opt-in via config

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with its own HTTP listener.
///
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_dispatch(method: &str, matched: bool, start: Instant) {
    let matched = if matched { "true" } else { "false" };
    metrics::counter!(
        "router_dispatch_total",
        "method" => method.to_string(),
        "matched" => matched
    )
    .increment(1);
    metrics::histogram!("router_dispatch_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_handler_invoked(method: &str) {
    metrics::counter!("router_handlers_invoked_total", "method" => method.to_string())
        .increment(1);
}

pub fn record_emission_failure() {
    metrics::counter!("router_emission_failures_total").increment(1);
}
