//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. `main` reads an optional `.env` file first.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, SocketAddr};

use sobripos_db::{DbConfig, DEFAULT_DATABASE_URL};

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to listen on
    pub bind_address: IpAddr,

    /// HTTP server port
    pub http_port: u16,

    /// sqlx SQLite connection string
    pub database_url: String,

    /// Pool size
    pub database_max_connections: u32,

    /// Apply embedded migrations at startup
    pub run_migrations: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the environment in `load`).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| "0.0.0.0".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BIND_ADDRESS".to_string()))?,

            http_port: lookup("HTTP_PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),

            database_max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,

            run_migrations: lookup("RUN_MIGRATIONS")
                .unwrap_or_else(|| "true".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RUN_MIGRATIONS".to_string()))?,
        };

        if config.database_url.trim().is_empty() {
            return Err(ConfigError::MissingRequired("DATABASE_URL".to_string()));
        }

        if config.database_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.http_port)
    }

    /// Pool settings for [`sobripos_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_url)
            .max_connections(self.database_max_connections)
            .min_connections(1)
            .run_migrations(self.run_migrations)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.database_url, "sqlite://sobripos.db?mode=rwc");
        assert_eq!(config.database_max_connections, 5);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("BIND_ADDRESS", "127.0.0.1"),
            ("HTTP_PORT", "8080"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("RUN_MIGRATIONS", "false"),
        ])
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert!(!config.db_config().run_migrations);
        assert_eq!(config.db_config().database_url, "sqlite::memory:");
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("HTTP_PORT", "http")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for HTTP_PORT");

        assert!(matches!(
            load(&[("DATABASE_MAX_CONNECTIONS", "0")]),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            load(&[("RUN_MIGRATIONS", "yes")]),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
