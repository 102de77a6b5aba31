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

pub(crate) fn record_session_transition(to: &'static str) {
    metrics::counter!("exam_session_transitions_total", "to" => to).increment(1);
}

pub(crate) fn record_judge_call(outcome: &'static str, elapsed_seconds: f64) {
    metrics::counter!("judge_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("judge_request_duration_seconds").record(elapsed_seconds);
}
