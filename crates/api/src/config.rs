//! Process configuration for the Inventory Service.

use std::net::SocketAddr;
use std::time::Duration;

use stockroom_infra::DatabaseConfig;
use stockroom_observability::{ServiceIdentity, TelemetryConfig};
use thiserror::Error;

pub const SERVICE_NAME: &str = "api-inventory";
pub const SERVICE_VERSION: &str = "1.0.0";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";
pub const DEFAULT_LIST_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR `{0}`")]
    BindAddr(String),

    #[error("invalid LIST_DELAY_MS `{0}`")]
    ListDelay(String),

    #[error("unknown STORE `{0}` (expected `mysql` or `memory`)")]
    Store(String),
}

/// Which item store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MySql,
    /// Process-local table, lost on restart. Dev only.
    Memory,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    pub list_delay: Duration,
    pub store: StoreBackend,
    pub database: DatabaseConfig,
    pub telemetry: TelemetryConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|_| ConfigError::BindAddr(bind_addr.clone()))?;

        let list_delay = match lookup("LIST_DELAY_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::ListDelay(raw))?,
            None => DEFAULT_LIST_DELAY,
        };

        let store = match lookup("STORE").as_deref() {
            None | Some("mysql") => StoreBackend::MySql,
            Some("memory") => StoreBackend::Memory,
            Some(other) => return Err(ConfigError::Store(other.to_string())),
        };

        let telemetry = TelemetryConfig::new(ServiceIdentity::new(SERVICE_NAME, SERVICE_VERSION))
            .with_lookup(&lookup);

        Ok(Self {
            bind_addr,
            list_delay,
            store,
            database: DatabaseConfig::from_lookup(&lookup),
            telemetry,
        })
    }
}
