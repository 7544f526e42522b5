use std::sync::Arc;

use anyhow::Context;
use stockroom_observability::Telemetry;
use stockroom_ui::app::{build_app, UiServices};
use stockroom_ui::config::UiConfig;
use stockroom_ui::upstream::InventoryClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init(env!("CARGO_PKG_NAME"));

    let config = UiConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        inventory_api_url = %config.inventory_api_url,
        upstream_timeout_secs = config.upstream_timeout.map(|t| t.as_secs()),
        "configuration loaded"
    );

    // The OTLP exporter builds a blocking HTTP client; keep that off the async workers.
    let telemetry_config = config.telemetry.clone();
    let telemetry = tokio::task::spawn_blocking(move || Telemetry::install(&telemetry_config))
        .await
        .context("telemetry setup task panicked")?
        .context("failed to configure span export")?;
    let telemetry = Arc::new(telemetry);

    let inventory = InventoryClient::new(
        config.inventory_api_url.clone(),
        config.upstream_timeout,
        telemetry.clone(),
    )
    .context("failed to build inventory client")?;

    let app = build_app(UiServices::new(inventory), telemetry.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tokio::task::spawn_blocking(move || telemetry.shutdown())
        .await
        .context("telemetry shutdown task panicked")??;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
