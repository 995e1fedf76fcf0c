//! Static service discovery from configured endpoints.

use async_trait::async_trait;

use super::{DiscoveryError, ServiceDiscovery};

/// Endpoints fixed at startup.
#[derive(Debug, Clone)]
pub struct StaticDiscovery {
    endpoints: Vec<String>,
}

impl StaticDiscovery {
    pub fn new(endpoints: Vec<String>) -> Self {
        let endpoints = endpoints
            .into_iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        Self { endpoints }
    }
}

#[async_trait]
impl ServiceDiscovery for StaticDiscovery {
    async fn resolve(&self) -> Result<Vec<String>, DiscoveryError> {
        if self.endpoints.is_empty() {
            return Err(DiscoveryError::NoEndpoints("static configuration".to_string()));
        }
        Ok(self.endpoints.clone())
    }
}
