//! HTTP client for the RAG API

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::RagApiConfig;
use crate::error::{Error, Result};
use crate::types::{Envelope, QueryRequest};

use super::RagProvider;

/// RAG API client.
///
/// Issues exactly one request per query; transport failures are returned to
/// the caller, never retried.
pub struct RagClient {
    /// HTTP client
    client: Client,
    /// `{base_url}/api/query`
    endpoint: String,
}

impl RagClient {
    /// Create a new RAG API client
    pub fn new(config: &RagApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(5)
            .build()?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// Create from an existing reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/query", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RagProvider for RagClient {
    async fn query(&self, request: QueryRequest) -> Result<Envelope> {
        tracing::debug!(
            "RAG query (mode: {}, files: {})",
            request.mode.as_str(),
            request.files.as_ref().map_or(0, Vec::len)
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("RAG API returned HTTP {} for {} query", status, request.mode.as_str());
            return Err(Error::remote(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<Envelope>(&body)
            .map_err(|e| Error::malformed(format!("Invalid RAG envelope: {}", e)))
    }

    fn name(&self) -> &str {
        "rag-api"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let config = RagApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..Default::default()
        };
        let client = RagClient::new(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000/api/query");
    }
}
