//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file. Every field carries a
//! default matching the values the service has always used, so the binary
//! also runs with no configuration file at all. `AppConfig` is the root
//! configuration struct containing all settings.

use serde::Deserialize;
use std::path::Path;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "hitlog=debug,tower_http=debug";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// PostgreSQL connection settings
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        5000
    }
}

/// PostgreSQL connection settings.
///
/// Connections are opened fresh at every call site (startup initialization
/// and each write request) and closed when done; there is no pool.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "DatabaseConfig::default_host")]
    pub host: String,
    #[serde(default = "DatabaseConfig::default_port")]
    pub port: u16,
    #[serde(default = "DatabaseConfig::default_dbname")]
    pub dbname: String,
    #[serde(default = "DatabaseConfig::default_user")]
    pub user: String,
    #[serde(default = "DatabaseConfig::default_password")]
    pub password: String,
    /// Total connection attempts before giving up
    #[serde(default = "DatabaseConfig::default_connect_retries")]
    pub connect_retries: u32,
    /// Delay in seconds between connection attempts
    #[serde(default = "DatabaseConfig::default_connect_delay")]
    pub connect_delay_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            dbname: Self::default_dbname(),
            user: Self::default_user(),
            password: Self::default_password(),
            connect_retries: Self::default_connect_retries(),
            connect_delay_seconds: Self::default_connect_delay(),
        }
    }
}

impl DatabaseConfig {
    fn default_host() -> String {
        "postgres".to_string()
    }

    fn default_port() -> u16 {
        5432
    }

    fn default_dbname() -> String {
        "postgres".to_string()
    }

    fn default_user() -> String {
        "postgres".to_string()
    }

    fn default_password() -> String {
        "postgres".to_string()
    }

    fn default_connect_retries() -> u32 {
        10
    }

    fn default_connect_delay() -> u64 {
        3
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from `path`, falling back to built-in defaults
    /// when the file does not exist. Parse errors in an existing file are
    /// still fatal.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_values() {
        let config = AppConfig::default();
        assert_eq!(config.http.host, "0.0.0.0");
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.database.host, "postgres");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.dbname, "postgres");
        assert_eq!(config.database.user, "postgres");
        assert_eq!(config.database.password, "postgres");
        assert_eq!(config.database.connect_retries, 10);
        assert_eq!(config.database.connect_delay_seconds, 3);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [http]
            host = "127.0.0.1"
            port = 8080

            [database]
            host = "db.internal"
            port = 5433
            dbname = "hits"
            user = "app"
            password = "secret"
            connect_retries = 5
            connect_delay_seconds = 1
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.http.host, "127.0.0.1");
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 5433);
        assert_eq!(config.database.dbname, "hits");
        assert_eq!(config.database.user, "app");
        assert_eq!(config.database.password, "secret");
        assert_eq!(config.database.connect_retries, 5);
        assert_eq!(config.database.connect_delay_seconds, 1);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml = r#"
            [database]
            host = "localhost"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.connect_retries, 10);
        assert_eq!(config.http.port, 5000);
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.http.port, 5000);
        assert_eq!(config.database.connect_delay_seconds, 3);
    }
}
