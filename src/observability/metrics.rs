//! Run metrics.
//!
//! # Metrics
//! - `crawler_services_total` (counter): services by outcome
//!   (`success`, `http_error`, `transport_error`, `skipped`)
//! - `crawler_client_latency_seconds` (histogram): client-observed round trip by path
//! - `crawler_extended_log_fetches_total` (counter): secondary log fetches issued

use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install a Prometheus recorder as the global metrics recorder.
///
/// The returned handle renders the current snapshot in text exposition format.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

pub fn record_service_outcome(outcome: &'static str) {
    counter!("crawler_services_total", "outcome" => outcome).increment(1);
}

pub fn record_client_latency(path: &str, elapsed: Duration) {
    histogram!("crawler_client_latency_seconds", "path" => path.to_string()).record(elapsed.as_secs_f64());
}

pub fn record_extended_log_fetch() {
    counter!("crawler_extended_log_fetches_total").increment(1);
}
