use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

use crate::errors::HospitalOp;

// Prometheus metrics (default registry)
pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "hospital_registry_operations_total",
        "Hospital operations handled, by operation and outcome",
        &["op", "outcome"]
    )
    .expect("register operations_total")
});

pub static PERSIST_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "hospital_registry_persist_failures_total",
        "Mutations aborted because the data file could not be loaded or written"
    )
    .expect("register persist_failures_total")
});

/// Count one finished operation. `outcome` is `ok`, `not_found`, `conflict`, `error`,
/// or `degraded` for a list answered empty because the data file could not be read.
pub fn record(op: HospitalOp, outcome: &str) {
    OPERATIONS_TOTAL.with_label_values(&[op.as_str(), outcome]).inc();
    if outcome == "error" {
        PERSIST_FAILURES_TOTAL.inc();
    }
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
