use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::likes::LikeOutcome;

// Prometheus metrics (default registry)
pub static LIKE_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "likes_operations_total",
        "Like/unlike requests by operation and outcome",
        &["op", "outcome"]
    )
    .expect("register likes_operations_total")
});

pub static LIKE_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "likes_request_errors_total",
        "Likes requests that failed with a server error",
        &["op"]
    )
    .expect("register likes_request_errors_total")
});

pub fn record_outcome(op: &str, outcome: LikeOutcome) {
    LIKE_OPERATIONS_TOTAL.with_label_values(&[op, outcome.as_str()]).inc();
}

pub fn record_error(op: &str) {
    LIKE_ERRORS_TOTAL.with_label_values(&[op]).inc();
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

pub async fn metrics() -> (StatusCode, String) {
    encode_metrics()
}
