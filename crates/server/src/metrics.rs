//! Prometheus metrics for the filecat server.
//!
//! Counts record writes and duplicate rejections and tracks the number of
//! live records. Exposed on `/metrics` when `server.metrics_enabled` is set.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use std::sync::{LazyLock, Once};

/// Global Prometheus registry for all metrics.
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

pub static FILES_CREATED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new("filecat_files_created_total", "Total number of files added")
        .expect("metric creation failed")
});

pub static FILES_UPDATED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new("filecat_files_updated_total", "Total number of files updated")
        .expect("metric creation failed")
});

pub static FILES_DELETED: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new("filecat_files_deleted_total", "Total number of files deleted")
        .expect("metric creation failed")
});

pub static DUPLICATE_REJECTIONS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        Opts::new(
            "filecat_duplicate_rejections_total",
            "Writes rejected because the filename and hash were already taken",
        ),
        &["operation"],
    )
    .expect("metric creation failed")
});

pub static FILES_LIVE: LazyLock<IntGauge> = LazyLock::new(|| {
    IntGauge::new("filecat_files_live", "Number of files currently in the registry")
        .expect("metric creation failed")
});

/// Guard to ensure metrics are only registered once.
static REGISTER_ONCE: Once = Once::new();

/// Register all metrics with the global registry.
///
/// Idempotent, so tests can build as many routers as they like.
pub fn register_metrics() {
    REGISTER_ONCE.call_once(|| {
        REGISTRY
            .register(Box::new(FILES_CREATED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(FILES_UPDATED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(FILES_DELETED.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(DUPLICATE_REJECTIONS.clone()))
            .expect("metric registration failed");
        REGISTRY
            .register(Box::new(FILES_LIVE.clone()))
            .expect("metric registration failed");
    });
}

/// GET /metrics - Prometheus metrics endpoint.
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {e}").into_bytes(),
        ),
    }
}

/// Record a write rejected by the uniqueness check.
pub fn record_duplicate(operation: &str) {
    DUPLICATE_REJECTIONS.with_label_values(&[operation]).inc();
}

/// Set the live-record gauge.
pub fn set_live_files(count: usize) {
    FILES_LIVE.set(i64::try_from(count).unwrap_or(i64::MAX));
}
