//! Gateway and RPC client configuration types.

use std::time::Duration;

use serde::Deserialize;

use super::{ConfigError, LogConfig};

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Service name, used in logs.
    pub name: String,
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// How to reach the user RPC service.
    pub user_rpc: RpcClientConfig,
    /// Logging configuration.
    pub log: LogConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            name: "userapi".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8888,
            user_rpc: RpcClientConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load the gateway configuration.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        super::load(path)
    }

    /// Get the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Location of a backend RPC service: static endpoints or an etcd lookup.
///
/// When `etcd` is set it takes precedence over `endpoints`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RpcClientConfig {
    /// Static `host:port` endpoints.
    pub endpoints: Vec<String>,
    /// Registry lookup.
    pub etcd: Option<EtcdConfig>,
    /// Per-call deadline in milliseconds.
    pub timeout_ms: u64,
}

impl Default for RpcClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Vec::new(),
            etcd: None,
            timeout_ms: 2_000,
        }
    }
}

impl RpcClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// etcd registry lookup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EtcdConfig {
    /// etcd client endpoints, `host:port` or full URLs.
    pub hosts: Vec<String>,
    /// Registration key of the service, e.g. `user.rpc`.
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_config_default() {
        let config = GatewayConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:8888");
        assert!(config.user_rpc.endpoints.is_empty());
        assert!(config.user_rpc.etcd.is_none());
        assert_eq!(config.user_rpc.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_parse_gateway_yaml() {
        let yaml = r#"
name: userapi
host: 127.0.0.1
port: 9999
user_rpc:
  etcd:
    hosts:
      - 127.0.0.1:2379
    key: user.rpc
  timeout_ms: 500
"#;

        let config: GatewayConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.addr(), "127.0.0.1:9999");
        let etcd = config.user_rpc.etcd.unwrap();
        assert_eq!(etcd.hosts, vec!["127.0.0.1:2379".to_string()]);
        assert_eq!(etcd.key, "user.rpc");
        assert_eq!(config.user_rpc.timeout_ms, 500);
    }
}
