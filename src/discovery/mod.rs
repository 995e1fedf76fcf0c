//! Service discovery for backend RPC endpoints.
//!
//! - `StaticDiscovery`: endpoints listed in configuration
//! - `EtcdDiscovery`: endpoints registered under a key prefix in etcd

mod etcd;
mod static_discovery;

use async_trait::async_trait;

use crate::config::RpcClientConfig;

pub use etcd::{prefix_end, EtcdDiscovery};
pub use static_discovery::StaticDiscovery;

/// Error types for service discovery.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("No endpoints found for {0}")]
    NoEndpoints(String),

    #[error("Registry request to {address} failed: {message}")]
    Request { address: String, message: String },

    #[error("Malformed registry entry: {0}")]
    Decode(String),

    #[error("No endpoints or etcd registry configured")]
    NotConfigured,
}

/// Resolves the addresses a client may connect to.
#[async_trait]
pub trait ServiceDiscovery: Send + Sync {
    /// Current `host:port` endpoints, never empty on success.
    async fn resolve(&self) -> Result<Vec<String>, DiscoveryError>;
}

/// Pick the discovery source for `config`. etcd wins over static endpoints.
pub fn from_config(config: &RpcClientConfig) -> Result<Box<dyn ServiceDiscovery>, DiscoveryError> {
    if let Some(etcd) = &config.etcd {
        return Ok(Box::new(EtcdDiscovery::new(etcd.clone(), config.timeout())?));
    }
    if !config.endpoints.is_empty() {
        return Ok(Box::new(StaticDiscovery::new(config.endpoints.clone())));
    }
    Err(DiscoveryError::NotConfigured)
}
