//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                    | Default       |
//! |-----------------------------|---------------|
//! | `BAZAAR_HTTP_PORT`          | `3000`        |
//! | `BAZAAR_BIND_ADDR`          | `0.0.0.0`     |
//! | `BAZAAR_DB_PATH`            | `./bazaar.db` |
//! | `BAZAAR_DB_MAX_CONNECTIONS` | `5`           |

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use bazaar_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Interface to bind
    pub bind_addr: IpAddr,

    /// SQLite database file
    pub db_path: PathBuf,

    /// Connection pool upper bound
    pub db_max_connections: u32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ApiConfig {
            http_port: lookup("BAZAAR_HTTP_PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BAZAAR_HTTP_PORT".to_string()))?,

            bind_addr: lookup("BAZAAR_BIND_ADDR")
                .unwrap_or_else(|| "0.0.0.0".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BAZAAR_BIND_ADDR".to_string()))?,

            db_path: lookup("BAZAAR_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./bazaar.db")),

            db_max_connections: lookup("BAZAAR_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BAZAAR_DB_MAX_CONNECTIONS".to_string()))?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "BAZAAR_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        Ok(config)
    }

    /// Address the HTTP listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.db_path.clone()).max_connections(self.db_max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
