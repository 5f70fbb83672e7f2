//! File search: local name filtering and debounced smart search

pub mod orchestrator;
pub mod projection;

pub use orchestrator::SearchOrchestrator;
pub use projection::{filter_by_name, match_sources, project};

/// Observable search state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Current search box text
    pub query_text: String,
    /// Whether content search through the RAG API is on
    pub smart_search_enabled: bool,
    /// Source names from the last applied smart search; `None` until one has run
    pub smart_search_results: Option<Vec<String>>,
    /// A smart search request is in flight
    pub is_searching: bool,
    /// A debounce timer is armed
    pub debounce_pending: bool,
}

/// Where the search state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    /// Local substring filtering
    Idle,
    /// Waiting for the debounce window to close
    SmartPending,
    /// Request in flight
    SmartSearching,
    /// Smart search on, results (or none yet) applied
    SmartSettled,
}

impl SearchState {
    pub fn phase(&self) -> SearchPhase {
        if !self.smart_search_enabled {
            SearchPhase::Idle
        } else if self.is_searching {
            SearchPhase::SmartSearching
        } else if self.debounce_pending {
            SearchPhase::SmartPending
        } else {
            SearchPhase::SmartSettled
        }
    }

    /// Status line shown above the file list while smart search is on
    pub fn status_line(&self) -> Option<String> {
        if !self.smart_search_enabled {
            return None;
        }
        if self.is_searching {
            return Some("Buscando...".to_string());
        }
        self.smart_search_results.as_ref().map(|results| {
            format!(
                "{} archivo(s) encontrado(s) con contenido relacionado",
                results.len()
            )
        })
    }
}
