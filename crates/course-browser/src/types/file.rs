//! Object store listing entries

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::naming;

/// One object under the listed folder prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Key relative to the folder prefix
    pub file_name: String,
    /// Full storage key (unique, opaque)
    pub key: String,
    /// Object size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Last modification time reported by the store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl FileEntry {
    /// Create an entry with only a name and key
    pub fn new(file_name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            key: key.into(),
            size: None,
            last_modified: None,
        }
    }

    /// Last path component of the key, used for display and downloads
    pub fn base_name(&self) -> &str {
        naming::base_name(&self.key)
    }

    /// Human readable size (e.g. "1.2 MB")
    pub fn display_size(&self) -> Option<String> {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
        let mut value = self.size? as f64;
        let mut unit = 0;
        while value >= 1024.0 && unit < UNITS.len() - 1 {
            value /= 1024.0;
            unit += 1;
        }
        Some(if unit == 0 {
            format!("{} {}", value as u64, UNITS[unit])
        } else {
            format!("{:.1} {}", value, UNITS[unit])
        })
    }
}

/// A downloaded object
#[derive(Debug, Clone)]
pub struct Download {
    /// File name from `Content-Disposition` or the key
    pub file_name: String,
    /// Content type reported by the gateway
    pub content_type: String,
    /// Object bytes
    pub bytes: Bytes,
}
