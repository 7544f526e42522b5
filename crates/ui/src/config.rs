//! Process configuration for the User Interface Service.

use std::net::SocketAddr;
use std::time::Duration;

use stockroom_observability::{ServiceIdentity, TelemetryConfig};
use thiserror::Error;

pub const SERVICE_NAME: &str = "user_interface";
pub const SERVICE_VERSION: &str = "1.5.0";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_INVENTORY_API_URL: &str = "http://localhost:8001";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR `{0}`")]
    BindAddr(String),

    #[error("invalid UPSTREAM_TIMEOUT_SECS `{0}`")]
    UpstreamTimeout(String),
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub bind_addr: SocketAddr,
    pub inventory_api_url: String,
    /// `None` means outbound calls never time out.
    pub upstream_timeout: Option<Duration>,
    pub telemetry: TelemetryConfig,
}

impl UiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse()
            .map_err(|_| ConfigError::BindAddr(bind_addr.clone()))?;

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => return Err(ConfigError::UpstreamTimeout(raw)),
            },
            None => None,
        };

        Ok(Self {
            bind_addr,
            inventory_api_url: lookup("INVENTORY_API_URL")
                .unwrap_or_else(|| DEFAULT_INVENTORY_API_URL.to_string()),
            upstream_timeout,
            telemetry: TelemetryConfig::new(ServiceIdentity::new(SERVICE_NAME, SERVICE_VERSION))
                .with_lookup(&lookup),
        })
    }
}
