use person_service::config::{PersonConfig, SERVICE_NAME};
use person_service::services::init_metrics;
use person_service::startup::Application;
use service_core::observability::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PersonConfig::load()?;

    init_tracing(
        SERVICE_NAME,
        &config.observability.log_level,
        config.observability.otlp_endpoint.as_deref(),
    )?;

    // Recorder must exist before the first request records anything.
    init_metrics()?;

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start {}: {}", SERVICE_NAME, e);
        e
    })?;

    let result = application.run_until_stopped().await;
    shutdown_tracing();
    result?;

    Ok(())
}
