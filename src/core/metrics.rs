use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::core::config::Settings;

static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub(crate) fn init(settings: &Settings) -> anyhow::Result<()> {
    if !settings.telemetry().prometheus_enabled || PROM_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    let _ = PROM_HANDLE.set(handle);
    Ok(())
}

pub(crate) fn render() -> Option<String> {
    PROM_HANDLE.get().map(|handle| handle.render())
}

pub(crate) fn record_grade(subject_id: &str) {
    metrics::counter!("grades_recorded_total", "subject" => subject_id.to_string()).increment(1);
}

pub(crate) fn record_assignment(result: &'static str) {
    metrics::counter!("assignments_generated_total", "result" => result).increment(1);
}

pub(crate) fn record_ai_request(flow: &'static str, result: &'static str, seconds: f64) {
    metrics::counter!("ai_requests_total", "flow" => flow, "result" => result).increment(1);
    metrics::histogram!("ai_request_duration_seconds", "flow" => flow).record(seconds);
}
