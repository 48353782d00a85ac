//! Prometheus metrics for ai-service.
//!
//! Request metrics come from `service_core`'s middleware; this module owns the
//! exporter and the analysis outcome counter.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!(error = %e, "Failed to install Prometheus recorder"),
    }
}

/// Render the exposition text, empty when metrics were never initialized.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

/// Count one analysis by outcome (`success` or a provider error kind).
pub fn record_analysis(outcome: &'static str) {
    counter!("ai_analysis_requests_total", "outcome" => outcome).increment(1);
}
