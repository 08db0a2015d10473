use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::errors::ServiceError;

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "user_registry_requests_total",
        "Total user registry operations by op",
        &["op"]
    )
    .expect("register requests_total")
});

pub static ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "user_registry_errors_total",
        "Total failed user registry operations by op and error kind",
        &["op", "kind"]
    )
    .expect("register errors_total")
});

/// Count one operation and, on failure, its error kind.
pub fn observe<T>(op: &'static str, res: &Result<T, ServiceError>) {
    REQUESTS_TOTAL.with_label_values(&[op]).inc();
    if let Err(e) = res {
        ERRORS_TOTAL.with_label_values(&[op, e.kind()]).inc();
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_errors_show_up_in_encoded_metrics() {
        observe::<()>("get", &Err(ServiceError::not_found("user")));
        observe("get", &Ok(()));
        let (status, body) = encode_metrics();
        assert_eq!(status, axum::http::StatusCode::OK);
        assert!(body.contains("user_registry_requests_total"));
        assert!(body.contains(r#"kind="not_found""#));
    }
}
