//! Application root: file listing, search, selection and tools

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::BrowserConfig;
use crate::error::Result;
use crate::gateway::{self, FileGateway, GatewayClient};
use crate::rag::{self, Answered, RagClient, RagProvider};
use crate::search::{match_sources, SearchOrchestrator};
use crate::selection::Selection;
use crate::tools::ToolsPanel;
use crate::types::{FileEntry, SearchPayload};

/// State of the file listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Listing failed; holds the text shown to the user
    Failed(String),
}

/// Course browser
pub struct Browser {
    gateway: Arc<dyn FileGateway>,
    provider: Arc<dyn RagProvider>,
    ramo: String,
    folder: String,
    files: Vec<FileEntry>,
    load_state: LoadState,
    search: SearchOrchestrator,
    selection: Selection,
    download_error: Option<String>,
    pub tools: ToolsPanel,
}

impl Browser {
    /// Build a browser over the given services
    pub fn new(
        gateway: Arc<dyn FileGateway>,
        provider: Arc<dyn RagProvider>,
        config: &BrowserConfig,
    ) -> Self {
        let selection = Selection::new();
        Self {
            gateway,
            provider: Arc::clone(&provider),
            ramo: config.rag.ramo.clone(),
            folder: config.gateway.folder.clone(),
            files: Vec::new(),
            load_state: LoadState::Loading,
            search: SearchOrchestrator::new(
                Arc::clone(&provider),
                config.rag.ramo.clone(),
                config.search.debounce(),
            ),
            tools: ToolsPanel::new(provider, &config.rag, selection.clone()),
            selection,
            download_error: None,
        }
    }

    /// Build a browser talking HTTP to the configured services
    pub fn from_config(config: &BrowserConfig) -> Result<Self> {
        let gateway = GatewayClient::new(&config.gateway)?;
        let provider = RagClient::new(&config.rag)?;
        tracing::info!(
            "Using gateway at {} and RAG API at {} (ramo {})",
            config.gateway.base_url,
            config.rag.base_url,
            config.rag.ramo
        );
        Ok(Self::new(Arc::new(gateway), Arc::new(provider), config))
    }

    /// Fetch the file listing. Failures are kept as user-visible text in
    /// `load_state` and returned.
    pub async fn load(&mut self) -> Result<usize> {
        self.load_state = LoadState::Loading;
        match self.gateway.list_files(&self.folder).await {
            Ok(files) => {
                tracing::info!("Loaded {} file(s) from {}", files.len(), self.folder);
                self.files = files;
                self.load_state = LoadState::Ready;
                Ok(self.files.len())
            }
            Err(e) => {
                tracing::error!("Listing {} via {} failed: {}", self.folder, self.gateway.name(), e);
                self.load_state = LoadState::Failed(e.user_message());
                Err(e)
            }
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    /// Every listed file
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Files to show for the current search
    pub fn visible_files(&self) -> Vec<&FileEntry> {
        self.search.visible_files(&self.files)
    }

    pub fn search(&self) -> &SearchOrchestrator {
        &self.search
    }

    /// Smart search status line, if smart search is on
    pub fn search_status(&self) -> Option<String> {
        self.search.state().status_line()
    }

    /// Single content search with the per-file explanation decoded.
    ///
    /// Runs outside the debounced search state; pair with `files_matching`
    /// on the returned sources to get the files it refers to.
    pub async fn explain_search(&self, query: &str) -> Result<Answered<SearchPayload>> {
        rag::search_details(self.provider.as_ref(), &self.ramo, query).await
    }

    /// Listed files matching the given source names
    pub fn files_matching<S: AsRef<str>>(&self, sources: &[S]) -> Vec<&FileEntry> {
        match_sources(&self.files, sources)
    }

    pub fn set_query(&self, text: impl Into<String>) {
        self.search.set_query(text);
    }

    pub fn toggle_smart_search(&self) -> bool {
        self.search.toggle_smart_search()
    }

    /// Download `key` into `dir`
    pub async fn download(&mut self, key: &str, dir: &Path) -> Result<PathBuf> {
        self.download_error = None;
        let result = match self.gateway.download(key).await {
            Ok(download) => gateway::save_download(&download, dir).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            tracing::error!("Download of {} failed: {}", key, e);
            self.download_error = Some(e.user_message());
        }
        result
    }

    /// Error text from the last failed download
    pub fn download_error(&self) -> Option<&str> {
        self.download_error.as_deref()
    }

    /// Attach or detach a file; returns whether it is now attached
    pub fn toggle_selection(&self, key: &str) -> bool {
        self.selection.toggle(key)
    }

    pub fn clear_selection(&self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }
}
