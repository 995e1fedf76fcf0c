//! Server, mode and logging configuration types.

use std::fmt;
use std::net::SocketAddr;

use serde::Deserialize;

use super::ConfigError;

/// Operating mode of a service.
///
/// Only `dev` and `test` expose gRPC reflection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Local development.
    #[serde(alias = "development")]
    Dev,
    /// Automated testing.
    Test,
    /// Regression testing.
    Rt,
    /// Pre-release.
    Pre,
    /// Production.
    #[default]
    #[serde(alias = "production")]
    Pro,
}

impl Mode {
    /// Whether the RPC server advertises its schema to reflection clients.
    pub fn introspection_enabled(self) -> bool {
        matches!(self, Mode::Dev | Mode::Test)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Dev => "dev",
            Mode::Test => "test",
            Mode::Rt => "rt",
            Mode::Pre => "pre",
            Mode::Pro => "pro",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RPC listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, `host:port`.
    pub listen_on: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_on: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ServerConfig {
    /// Parse `listen_on` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen_on
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidAddress {
                address: self.listen_on.clone(),
                message: e.to_string(),
            })
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive when `MALL_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
