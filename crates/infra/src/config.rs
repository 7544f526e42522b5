//! Database connection settings.

use std::fmt;

use sqlx::mysql::MySqlConnectOptions;

/// Connection parameters for the inventory database.
///
/// Every field falls back to a placeholder when its environment variable is
/// unset, so a misconfigured deployment starts and fails per request instead
/// of refusing to boot.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: "changeme".to_string(),
            database: "inventory".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    /// Read `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_DATABASE` and
    /// `DB_MAX_CONNECTIONS` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DatabaseConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let port = match lookup("DB_PORT").map(|v| v.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(_)) => {
                tracing::warn!("DB_PORT is not a valid port; using {}", defaults.port);
                defaults.port
            }
            None => defaults.port,
        };
        let max_connections = match lookup("DB_MAX_CONNECTIONS").map(|v| v.parse::<u32>()) {
            Some(Ok(n)) if n > 0 => n,
            Some(_) => {
                tracing::warn!(
                    "DB_MAX_CONNECTIONS is not a positive integer; using {}",
                    defaults.max_connections
                );
                defaults.max_connections
            }
            None => defaults.max_connections,
        };

        Self {
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port,
            user: lookup("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            database: lookup("DB_DATABASE").unwrap_or(defaults.database),
            max_connections,
        }
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}
