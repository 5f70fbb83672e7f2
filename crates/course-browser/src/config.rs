//! Configuration for the course browser

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Main course browser configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Object store gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// RAG API configuration
    #[serde(default)]
    pub rag: RagApiConfig,
    /// Smart search configuration
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BrowserConfig {
    /// Load configuration from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    Error::config(format!("Cannot read {}: {}", path.display(), e))
                })?;
                Self::from_toml(&raw)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::config(format!("Invalid TOML: {}", e)))
    }

    /// Apply overrides from the environment.
    ///
    /// The lookup is injected so tests don't have to touch the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("COURSE_GATEWAY_URL") {
            self.gateway.base_url = url;
        }
        if let Some(folder) = lookup("COURSE_FOLDER") {
            self.gateway.folder = folder;
        }
        if let Some(url) = lookup("RAG_API_URL") {
            self.rag.base_url = url;
        }
        if let Some(ramo) = lookup("RAG_RAMO") {
            self.rag.ramo = ramo;
        }
        if let Some(ms) = lookup("SMART_SEARCH_DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
            self.search.debounce_ms = ms;
        }
    }

    /// Check that the configured endpoints are usable
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("gateway.base_url", &self.gateway.base_url),
            ("rag.base_url", &self.rag.base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }
        if self.rag.ramo.trim().is_empty() {
            return Err(Error::config("rag.ramo must not be empty"));
        }
        Ok(())
    }
}

/// Object store gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateway base URL
    #[serde(default = "default_gateway_url")]
    pub base_url: String,
    /// Folder prefix listed on startup
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Request timeout in seconds
    #[serde(default = "default_gateway_timeout")]
    pub timeout_secs: u64,
}

fn default_gateway_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_folder() -> String {
    "plan-comun/CII-2750".to_string()
}

fn default_gateway_timeout() -> u64 {
    30
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_gateway_url(),
            folder: default_folder(),
            timeout_secs: default_gateway_timeout(),
        }
    }
}

/// RAG API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagApiConfig {
    /// RAG API base URL
    #[serde(default = "default_rag_url")]
    pub base_url: String,
    /// Course identifier scoping the document collection
    #[serde(default = "default_ramo")]
    pub ramo: String,
    /// Request timeout in seconds (generation can be slow)
    #[serde(default = "default_rag_timeout")]
    pub timeout_secs: u64,
    /// Prompt used when flashcards are requested without instructions
    #[serde(default = "default_flashcards_prompt")]
    pub default_flashcards_prompt: String,
}

fn default_rag_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_ramo() -> String {
    "CII-2750".to_string()
}

fn default_rag_timeout() -> u64 {
    120
}

fn default_flashcards_prompt() -> String {
    "Genera flashcards sobre el contexto adjuntado.".to_string()
}

impl Default for RagApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_rag_url(),
            ramo: default_ramo(),
            timeout_secs: default_rag_timeout(),
            default_flashcards_prompt: default_flashcards_prompt(),
        }
    }
}

/// Smart search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before the RAG API is called
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl SearchConfig {
    /// Debounce window as a duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "course_browser=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}
