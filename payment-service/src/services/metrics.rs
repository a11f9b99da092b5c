use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the process-wide Prometheus recorder. Call once, from `main`.
pub fn init_metrics() -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    METRICS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("metrics recorder already initialized"))?;

    Ok(())
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Count an authorize/capture/refund request by how it ended.
pub fn record_operation(operation: &'static str, outcome: &'static str) {
    counter!(
        "payment_operations_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

/// Count a notification delivery attempt by how it settled.
pub fn record_notification(title: &str, outcome: &'static str) {
    counter!(
        "payment_notifications_total",
        "title" => title.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
