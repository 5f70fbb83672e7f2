//! Object store gateway access

pub mod client;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::{Download, FileEntry};

pub use client::GatewayClient;

/// Trait for the object store gateway
///
/// Implementations:
/// - `GatewayClient`: HTTP client for `/api/files` and `/api/download`
#[async_trait]
pub trait FileGateway: Send + Sync {
    /// List the objects under a folder prefix, in store order
    async fn list_files(&self, folder: &str) -> Result<Vec<FileEntry>>;

    /// Fetch one object by key
    async fn download(&self, key: &str) -> Result<Download>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Write a download into `dir`, returning the written path.
///
/// Only the final path component of the advertised name is used.
pub async fn save_download(download: &Download, dir: &Path) -> Result<PathBuf> {
    let file_name = Path::new(&download.file_name)
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "download".into());

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, &download.bytes).await?;

    tracing::info!("Saved {} ({} bytes)", path.display(), download.bytes.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_save_download_strips_directories() {
        let dir = tempfile::tempdir().unwrap();
        let download = Download {
            file_name: "../../etc/Tarea_1.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        };

        let path = save_download(&download, dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("Tarea_1.pdf"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"%PDF-1.4");
    }
}
