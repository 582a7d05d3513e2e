//! Prometheus metrics for the student service.

use std::net::SocketAddr;

use metrics::{counter, gauge};

/// Install the Prometheus exporter, serving `/metrics` on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    if let Err(e) = builder.install() {
        tracing::warn!("Failed to install Prometheus exporter: {}", e);
    }
}

/// Record a finished request.
pub fn request_completed(operation: &'static str, status: u16) {
    counter!(
        "student_requests_total",
        "operation" => operation,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record a fault signalled by the repository.
pub fn repository_fault(kind: &'static str) {
    counter!("student_repository_faults_total", "kind" => kind).increment(1);
}

/// Set the number of records inserted by the seeder.
pub fn seeded_records(count: usize) {
    gauge!("student_seeded_records").set(count as f64);
}
