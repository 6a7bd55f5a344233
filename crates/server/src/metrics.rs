//! Prometheus metrics
//!
//! Counters are recorded through the `metrics` facade; the exporter is
//! installed once per process and rendered at `/metrics`.

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

use sales_assistant_core::Intent;

pub const REQUESTS_TOTAL: &str = "sales_assistant_requests_total";
pub const ERRORS_TOTAL: &str = "sales_assistant_errors_total";

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus recorder; later calls return the same handle
pub fn init_metrics() -> Option<PrometheusHandle> {
    HANDLE
        .get_or_try_init(|| PrometheusBuilder::new().install_recorder())
        .map_err(|e| tracing::warn!(error = %e, "Failed to install Prometheus recorder"))
        .ok()
        .cloned()
}

/// Count one chat message by intent
pub fn record_request(intent: Intent) {
    metrics::counter!(REQUESTS_TOTAL, "intent" => intent.as_str()).increment(1);
}

/// Count one pipeline fault
pub fn record_error(kind: &'static str) {
    metrics::counter!(ERRORS_TOTAL, "kind" => kind).increment(1);
}

/// Prometheus text exposition
pub async fn metrics_handler() -> impl IntoResponse {
    match HANDLE.get() {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            "metrics disabled\n".to_string(),
        ),
    }
}
