use std::sync::Arc;

use anyhow::Context;
use stockroom_api::app::{build_app, InventoryServices};
use stockroom_api::config::{ApiConfig, StoreBackend};
use stockroom_infra::{InMemoryItemStore, ItemStore, MySqlItemStore};
use stockroom_observability::Telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init(env!("CARGO_PKG_NAME"));

    let config = ApiConfig::from_env().context("invalid configuration")?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        store = ?config.store,
        database = ?config.database,
        list_delay_ms = config.list_delay.as_millis() as u64,
        "configuration loaded"
    );

    // The OTLP exporter builds a blocking HTTP client; keep that off the async workers.
    let telemetry_config = config.telemetry.clone();
    let telemetry = tokio::task::spawn_blocking(move || Telemetry::install(&telemetry_config))
        .await
        .context("telemetry setup task panicked")?
        .context("failed to configure span export")?;
    let telemetry = Arc::new(telemetry);

    // The MySQL handle is kept so its pool can be closed after the server drains.
    let (store, mysql): (Arc<dyn ItemStore>, Option<MySqlItemStore>) = match config.store {
        StoreBackend::MySql => {
            let mysql = MySqlItemStore::connect_lazy(&config.database);
            (Arc::new(mysql.clone()), Some(mysql))
        }
        StoreBackend::Memory => {
            tracing::warn!("STORE=memory; items are not persisted");
            (Arc::new(InMemoryItemStore::new()), None)
        }
    };

    let services = InventoryServices::new(store, telemetry.clone()).with_list_delay(config.list_delay);
    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(mysql) = mysql {
        mysql.close().await;
        tracing::info!("database pool closed");
    }

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
