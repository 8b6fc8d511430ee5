use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_tracing(service_name: &'static str) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_level(true)
                .compact(),
        )
        .try_init()?;

    tracing::info!(service = service_name, "Logging initialized");

    Ok(())
}

pub fn init_metrics(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;

    metrics::describe_counter!(
        "bff.backend.failures",
        "Backend calls that returned a non-success status or failed in transport"
    );
    metrics::describe_histogram!(
        "bff.backend.latency",
        metrics::Unit::Seconds,
        "Latency of outbound backend calls"
    );
    metrics::describe_counter!(
        "bff.statistics.first_game_of_day",
        "Finished games that opened a new daily statistics record"
    );

    tracing::info!(addr = %addr, "Prometheus metrics exporter started");

    Ok(())
}

pub fn record_timing(metric_name: &'static str, duration_secs: f64) {
    metrics::histogram!(metric_name).record(duration_secs);
}

/// Latency of one backend call, labelled by service and outcome.
pub fn record_backend_timing(service: &'static str, success: bool, duration_secs: f64) {
    metrics::histogram!(
        "bff.backend.latency",
        "service" => service,
        "outcome" => if success { "success" } else { "failure" }
    )
    .record(duration_secs);
}

pub fn record_counter(metric_name: &'static str, value: u64) {
    metrics::counter!(metric_name).increment(value);
}

pub async fn shutdown() {
    tracing::info!("Telemetry shutdown complete");
}
