//! Default client implementation wrapping the tonic gRPC client.

use std::time::Duration;

use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};
use tonic::Request;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::proto::user_client::UserClient as TonicUserClient;
use crate::proto::{IdRequest, UserRequest, UserResponse};
use crate::traits;

/// Normalize `host:port` into a URI tonic accepts.
fn endpoint_uri(endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("http://{}", endpoint)
    }
}

fn build_endpoint(endpoint: &str, timeout: Duration) -> Result<Endpoint> {
    Ok(Endpoint::from_shared(endpoint_uri(endpoint))
        .map_err(|e| ClientError::Connection(e.to_string()))?
        .connect_timeout(timeout)
        .timeout(timeout))
}

/// User service client using tonic gRPC.
///
/// Every call carries a deadline: the channel enforces it locally and the
/// `grpc-timeout` header hands it to the server.
#[derive(Clone)]
pub struct UserRpcClient {
    inner: TonicUserClient<Channel>,
    timeout: Duration,
}

impl UserRpcClient {
    /// Build a client whose channel connects on first use.
    ///
    /// An unreachable backend is reported by the first call rather than here.
    pub fn connect_lazy(endpoint: &str, timeout: Duration) -> Result<Self> {
        let channel = build_endpoint(endpoint, timeout)?.connect_lazy();
        debug!(endpoint = %endpoint, timeout = ?timeout, "user rpc channel created");
        Ok(Self::from_channel(channel, timeout))
    }

    /// Wrap an existing channel.
    pub fn from_channel(channel: Channel, timeout: Duration) -> Self {
        Self {
            inner: TonicUserClient::new(channel),
            timeout,
        }
    }

    fn request<T>(&self, message: T) -> Request<T> {
        let mut request = Request::new(message);
        request.set_timeout(self.timeout);
        request
    }
}

#[async_trait]
impl traits::UserRpc for UserRpcClient {
    async fn get_user(&self, request: IdRequest) -> Result<UserResponse> {
        let mut client = self.inner.clone();
        let response = client.get_user(self.request(request)).await?;
        Ok(response.into_inner())
    }

    async fn save_user(&self, request: UserRequest) -> Result<UserResponse> {
        let mut client = self.inner.clone();
        let response = client.save_user(self.request(request)).await?;
        Ok(response.into_inner())
    }
}
