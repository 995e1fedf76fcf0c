//! Gateway service context.

use std::sync::Arc;
use std::time::Duration;

use backon::Retryable;
use mall_client::{ClientError, UserRpc, UserRpcClient};
use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::discovery::{self, DiscoveryError};
use crate::utils::retry::discovery_backoff;

/// Errors building the gateway context.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("RPC client setup failed: {0}")]
    Client(#[from] ClientError),
}

/// Dependencies shared by every gateway request.
pub struct GatewayContext {
    pub config: GatewayConfig,
    pub user_rpc: Arc<dyn UserRpc>,
}

impl GatewayContext {
    /// Resolve the user RPC backend and build its client.
    ///
    /// Resolution is retried with backoff; the channel itself connects
    /// lazily, so an unreachable backend surfaces on the first call.
    pub async fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let discovery = discovery::from_config(&config.user_rpc)?;

        let endpoints = (|| discovery.resolve())
            .retry(discovery_backoff())
            .notify(|err: &DiscoveryError, dur: Duration| {
                warn!(service = "user.rpc", error = %err, delay = ?dur, "Discovery failed, retrying");
            })
            .await?;

        let endpoint = endpoints
            .into_iter()
            .next()
            .ok_or_else(|| DiscoveryError::NoEndpoints("user.rpc".to_string()))?;
        info!(address = %endpoint, "Using user rpc endpoint");

        let client = UserRpcClient::connect_lazy(&endpoint, config.user_rpc.timeout())?;

        Ok(Self::from_parts(config, Arc::new(client)))
    }

    pub fn from_parts(config: GatewayConfig, user_rpc: Arc<dyn UserRpc>) -> Self {
        Self { config, user_rpc }
    }
}
