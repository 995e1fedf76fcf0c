//! Application configuration.
//!
//! Both binaries read a YAML file selected with `-f`, layered with
//! environment variables carrying the `MALL` prefix
//! (e.g. `MALL__SERVER__LISTEN_ON=0.0.0.0:9090`).

mod client;
mod server;
mod storage;

pub use client::{EtcdConfig, GatewayConfig, RpcClientConfig};
pub use server::{LogConfig, LogFormat, Mode, ServerConfig};
pub use storage::{PostgresConfig, SqliteConfig, StorageConfig, StorageType};

/// Default configuration file for the user RPC server.
pub const DEFAULT_RPC_CONFIG_FILE: &str = "etc/user.yaml";
/// Default configuration file for the HTTP gateway.
pub const DEFAULT_GATEWAY_CONFIG_FILE: &str = "etc/userapi.yaml";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "MALL";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "MALL_LOG";

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// User RPC server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Service name, used in logs.
    pub name: String,
    /// Operating mode. Gates gRPC reflection.
    pub mode: Mode,
    /// Listener configuration.
    pub server: ServerConfig,
    /// Relational store configuration.
    pub storage: StorageConfig,
    /// Logging configuration.
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "user.rpc".to_string(),
            mode: Mode::default(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Load the RPC server configuration.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        load(path)
    }

    /// Create config for testing: test mode, in-memory SQLite, ephemeral port.
    pub fn for_test() -> Self {
        Self {
            mode: Mode::Test,
            server: ServerConfig {
                listen_on: "127.0.0.1:0".to_string(),
            },
            storage: StorageConfig {
                storage_type: StorageType::Sqlite,
                sqlite: SqliteConfig {
                    path: SqliteConfig::IN_MEMORY.to_string(),
                },
                ..StorageConfig::default()
            },
            ..Self::default()
        }
    }
}

/// Load any configuration type from file and environment.
///
/// Configuration sources (later overrides earlier):
/// 1. Type defaults (`#[serde(default)]`)
/// 2. YAML file at `path` (if provided; must exist)
/// 3. Environment variables with `CONFIG_ENV_PREFIX` prefix, `__` separated
pub fn load<T: DeserializeOwned>(path: Option<&str>) -> Result<T, ConfigError> {
    use ::config::{Config as ConfigLib, Environment, File, FileFormat};

    let mut builder = ConfigLib::builder();

    if let Some(config_path) = path {
        builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
    }

    let config = builder
        .add_source(
            Environment::with_prefix(CONFIG_ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("user_rpc.endpoints")
                .with_list_parse_key("user_rpc.etcd.hosts"),
        )
        .build()?;

    Ok(config.try_deserialize()?)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid listen address '{address}': {message}")]
    InvalidAddress { address: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.name, "user.rpc");
        assert_eq!(config.mode, Mode::Pro);
        assert_eq!(config.server.listen_on, "0.0.0.0:8080");
        assert_eq!(config.storage.storage_type, StorageType::Sqlite);
    }

    #[test]
    fn test_config_for_test() {
        let config = Config::for_test();
        assert!(config.mode.introspection_enabled());
        assert_eq!(config.storage.sqlite.uri(), "sqlite::memory:");
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
name: user.rpc
mode: dev
server:
  listen_on: 127.0.0.1:9090
storage:
  type: postgres
  postgres:
    uri: postgres://mall:mall@db:5432/mall
  statement_timeout_ms: 250
log:
  level: debug
  format: json
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.mode, Mode::Dev);
        assert_eq!(config.server.listen_on, "127.0.0.1:9090");
        assert_eq!(config.storage.storage_type, StorageType::Postgres);
        assert_eq!(config.storage.postgres.uri, "postgres://mall:mall@db:5432/mall");
        assert_eq!(
            config.storage.statement_timeout(),
            std::time::Duration::from_millis(250)
        );
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, LogFormat::Json);
    }

    #[test]
    #[serial]
    fn test_load_from_file_with_env_override() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "mode: test\nserver:\n  listen_on: 127.0.0.1:7000\nstorage:\n  sqlite:\n    path: /tmp/mall-test.db"
        )
        .unwrap();

        std::env::set_var("MALL__SERVER__LISTEN_ON", "127.0.0.1:7001");
        let config = Config::load(Some(file.path().to_str().unwrap()));
        std::env::remove_var("MALL__SERVER__LISTEN_ON");

        let config = config.unwrap();
        assert_eq!(config.mode, Mode::Test);
        assert_eq!(config.server.listen_on, "127.0.0.1:7001");
        assert_eq!(config.storage.sqlite.path, "/tmp/mall-test.db");
    }

    #[test]
    #[serial]
    fn test_load_missing_file_fails() {
        let result = Config::load(Some("/nonexistent/mall/user.yaml"));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    #[serial]
    fn test_gateway_endpoints_from_env_list() {
        std::env::set_var("MALL__USER_RPC__ENDPOINTS", "10.0.0.1:8080,10.0.0.2:8080");
        let config = GatewayConfig::load(None);
        std::env::remove_var("MALL__USER_RPC__ENDPOINTS");

        let config = config.unwrap();
        assert_eq!(
            config.user_rpc.endpoints,
            vec!["10.0.0.1:8080".to_string(), "10.0.0.2:8080".to_string()]
        );
    }
}
