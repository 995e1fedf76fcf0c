//! etcd-backed service discovery over the v3 JSON gateway.
//!
//! Servers register one key per instance under `{key}/`, each holding a
//! `host:port` value. A lookup is a single range request over that prefix.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{DiscoveryError, ServiceDiscovery};
use crate::config::EtcdConfig;

const RANGE_PATH: &str = "/v3/kv/range";

#[derive(Debug, Serialize)]
struct RangeRequest {
    key: String,
    range_end: String,
}

#[derive(Debug, Deserialize)]
struct RangeResponse {
    #[serde(default)]
    kvs: Vec<KeyValue>,
}

#[derive(Debug, Deserialize)]
struct KeyValue {
    #[serde(default)]
    value: String,
}

/// Smallest key greater than every key starting with `prefix`.
///
/// Returns an empty vector when no such key exists (all bytes `0xff`),
/// which etcd reads as "to the end of the keyspace".
pub fn prefix_end(prefix: &[u8]) -> Vec<u8> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < 0xff {
            end.push(last + 1);
            return end;
        }
    }
    Vec::new()
}

/// Resolves endpoints registered in etcd.
pub struct EtcdDiscovery {
    config: EtcdConfig,
    http: reqwest::Client,
}

impl EtcdDiscovery {
    pub fn new(config: EtcdConfig, timeout: Duration) -> Result<Self, DiscoveryError> {
        if config.hosts.is_empty() {
            return Err(DiscoveryError::NoEndpoints(format!("etcd key '{}'", config.key)));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DiscoveryError::Request {
                address: config.hosts.join(","),
                message: e.to_string(),
            })?;

        Ok(Self { config, http })
    }

    fn range_request(&self) -> RangeRequest {
        let prefix = format!("{}/", self.config.key);
        RangeRequest {
            key: BASE64.encode(prefix.as_bytes()),
            range_end: BASE64.encode(prefix_end(prefix.as_bytes())),
        }
    }

    async fn query(&self, host: &str) -> Result<Vec<String>, DiscoveryError> {
        let base = if host.starts_with("http://") || host.starts_with("https://") {
            host.trim_end_matches('/').to_string()
        } else {
            format!("http://{host}")
        };
        let url = format!("{base}{RANGE_PATH}");
        let request_error = |e: reqwest::Error| DiscoveryError::Request {
            address: url.clone(),
            message: e.to_string(),
        };

        let response: RangeResponse = self
            .http
            .post(&url)
            .json(&self.range_request())
            .send()
            .await
            .map_err(request_error)?
            .error_for_status()
            .map_err(request_error)?
            .json()
            .await
            .map_err(request_error)?;

        response
            .kvs
            .into_iter()
            .map(|kv| {
                let raw = BASE64
                    .decode(kv.value.as_bytes())
                    .map_err(|e| DiscoveryError::Decode(e.to_string()))?;
                String::from_utf8(raw).map_err(|e| DiscoveryError::Decode(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl ServiceDiscovery for EtcdDiscovery {
    async fn resolve(&self) -> Result<Vec<String>, DiscoveryError> {
        let mut last_error = None;

        for host in &self.config.hosts {
            match self.query(host).await {
                Ok(endpoints) if endpoints.is_empty() => {
                    return Err(DiscoveryError::NoEndpoints(format!(
                        "etcd key '{}'",
                        self.config.key
                    )));
                }
                Ok(endpoints) => {
                    debug!(key = %self.config.key, ?endpoints, "Resolved endpoints from etcd");
                    return Ok(endpoints);
                }
                Err(e) => {
                    warn!(address = %host, error = %e, "etcd lookup failed, trying next host");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DiscoveryError::NoEndpoints(self.config.key.clone())))
    }
}
