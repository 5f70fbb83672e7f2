//! HTTP client for the object store gateway

use async_trait::async_trait;
use futures_util::StreamExt;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, Client, Response};
use serde::Deserialize;
use std::time::Duration;

use crate::config::GatewayConfig;
use crate::error::{Error, Result};
use crate::naming;
use crate::types::{Download, FileEntry};

use super::FileGateway;

static DISPOSITION_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"filename="?([^";]+)"?"#).unwrap());

/// Error body returned by the gateway
#[derive(Deserialize)]
struct GatewayErrorBody {
    error: String,
}

/// Gateway API client
pub struct GatewayClient {
    /// HTTP client
    client: Client,
    /// Base URL without trailing slash
    base_url: String,
}

impl GatewayClient {
    /// Create a new gateway client
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// Create from an existing reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL of the listing endpoint for a folder
    pub fn files_url(&self, folder: &str) -> String {
        format!("{}/api/files/{}", self.base_url, urlencoding::encode(folder))
    }

    /// URL of the download endpoint for a key
    pub fn download_url(&self, key: &str) -> String {
        format!("{}/api/download?key={}", self.base_url, urlencoding::encode(key))
    }

    /// Turn a non-2xx response into `RemoteService`, keeping the `{error}` text
    async fn remote_error(response: Response) -> Error {
        let status = response.status().as_u16();
        let message = response
            .json::<GatewayErrorBody>()
            .await
            .ok()
            .map(|body| body.error);
        Error::RemoteService { status, message }
    }
}

/// File name advertised in a `Content-Disposition` header
pub fn disposition_file_name(value: &str) -> Option<String> {
    DISPOSITION_FILENAME
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}

#[async_trait]
impl FileGateway for GatewayClient {
    async fn list_files(&self, folder: &str) -> Result<Vec<FileEntry>> {
        let response = self.client.get(self.files_url(folder)).send().await?;

        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        let body = response.bytes().await?;
        let files: Vec<FileEntry> = serde_json::from_slice(&body)
            .map_err(|e| Error::malformed(format!("Invalid file listing: {}", e)))?;

        tracing::info!("Listed {} files under {}", files.len(), folder);
        Ok(files)
    }

    async fn download(&self, key: &str) -> Result<Download> {
        let response = self.client.get(self.download_url(key)).send().await?;

        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        let headers = response.headers();
        let file_name = headers
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition_file_name)
            .unwrap_or_else(|| match naming::base_name(key) {
                "" => "download".to_string(),
                name => name.to_string(),
            });
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            bytes.extend_from_slice(&chunk?);
        }

        tracing::info!("Downloaded {} ({} bytes)", key, bytes.len());
        Ok(Download {
            file_name,
            content_type,
            bytes: bytes.into(),
        })
    }

    fn name(&self) -> &str {
        "gateway"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_encoded() {
        let client = GatewayClient::with_client(Client::new(), "http://localhost:3001/");
        assert_eq!(
            client.files_url("plan-comun/CII-2750"),
            "http://localhost:3001/api/files/plan-comun%2FCII-2750"
        );
        assert_eq!(
            client.download_url("plan-comun/CII-2750/Exam Review.pdf"),
            "http://localhost:3001/api/download?key=plan-comun%2FCII-2750%2FExam%20Review.pdf"
        );
    }

    #[test]
    fn test_disposition_file_name() {
        assert_eq!(
            disposition_file_name(r#"attachment; filename="Tarea_1.pdf""#).as_deref(),
            Some("Tarea_1.pdf")
        );
        assert_eq!(
            disposition_file_name("attachment; filename=notas.txt").as_deref(),
            Some("notas.txt")
        );
        assert_eq!(disposition_file_name("inline"), None);
    }
}
