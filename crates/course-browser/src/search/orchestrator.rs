//! Debounced smart search over the RAG API
//!
//! Every query change re-arms a single debounce timer. When the timer fires
//! the request is dispatched with a fresh id taken from `latest_request`; a
//! response is applied only if its id is still the latest one, so a slow
//! answer to an old query can never overwrite a newer one. Disabling smart
//! search or clearing the query also advances the id, dropping whatever is
//! still in flight. In-flight requests are left to finish, never cancelled.
//!
//! Ids are only read or advanced while holding the state lock (inside
//! `send_modify`/`send_if_modified`), so a check and the write it guards
//! cannot interleave with a disable or a query change.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::rag::{self, RagProvider};
use crate::types::FileEntry;

use super::projection::project;
use super::SearchState;

/// Owner of the search state
///
/// Cloning yields another handle to the same state. Must be used from within
/// a tokio runtime: query changes spawn the debounce timer.
#[derive(Clone)]
pub struct SearchOrchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    provider: Arc<dyn RagProvider>,
    ramo: String,
    debounce: Duration,
    state: watch::Sender<SearchState>,
    timer: Mutex<Option<JoinHandle<()>>>,
    latest_request: AtomicU64,
}

impl SearchOrchestrator {
    /// Create a new orchestrator
    pub fn new(provider: Arc<dyn RagProvider>, ramo: impl Into<String>, debounce: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            inner: Arc::new(Inner {
                provider,
                ramo: ramo.into(),
                debounce,
                state,
                timer: Mutex::new(None),
                latest_request: AtomicU64::new(0),
            }),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> SearchState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.state.subscribe()
    }

    /// Visible files for the current state
    pub fn visible_files<'a>(&self, files: &'a [FileEntry]) -> Vec<&'a FileEntry> {
        project(files, &self.inner.state.borrow())
    }

    /// Replace the query text
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        let mut smart = false;
        self.inner.state.send_modify(|state| {
            state.query_text = text.clone();
            smart = state.smart_search_enabled;
        });

        if smart {
            self.schedule(text);
        }
    }

    /// Turn smart search on or off
    pub fn set_smart_search(&self, enabled: bool) {
        let mut query = None;
        let mut changed = false;
        self.inner.state.send_modify(|state| {
            if state.smart_search_enabled == enabled {
                return;
            }
            changed = true;
            state.smart_search_enabled = enabled;
            if enabled {
                query = Some(state.query_text.clone());
            } else {
                self.inner.invalidate_in_flight();
                state.smart_search_results = None;
                state.is_searching = false;
                state.debounce_pending = false;
            }
        });

        if !changed {
            return;
        }
        match query {
            Some(query) => self.schedule(query),
            None => {
                self.cancel_timer();
                tracing::debug!("Smart search disabled");
            }
        }
    }

    /// Flip smart search, returning the new setting
    pub fn toggle_smart_search(&self) -> bool {
        let enabled = !self.inner.state.borrow().smart_search_enabled;
        self.set_smart_search(enabled);
        enabled
    }

    /// Wait until no timer is armed and no request is in flight
    pub async fn settled(&self) -> SearchState {
        let mut rx = self.subscribe();
        let settled = rx
            .wait_for(|state| !state.debounce_pending && !state.is_searching)
            .await
            .map(|state| state.clone());
        settled.unwrap_or_else(|_| self.state())
    }

    fn cancel_timer(&self) {
        if let Some(handle) = self.inner.timer.lock().take() {
            handle.abort();
        }
    }

    /// Re-arm the debounce timer for `query`
    fn schedule(&self, query: String) {
        self.cancel_timer();

        if query.trim().is_empty() {
            self.inner.state.send_modify(|state| {
                self.inner.invalidate_in_flight();
                state.smart_search_results = None;
                state.is_searching = false;
                state.debounce_pending = false;
            });
            return;
        }

        self.inner.state.send_modify(|state| state.debounce_pending = true);

        let weak = Arc::downgrade(&self.inner);
        let debounce = self.inner.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            // Nothing below awaits: once the timer has fired, aborting this
            // task can no longer cancel the dispatched request.
            if let Some(inner) = weak.upgrade() {
                Inner::dispatch(inner, query);
            }
        });

        *self.inner.timer.lock() = Some(handle);
    }
}

impl Inner {
    fn invalidate_in_flight(&self) {
        self.latest_request.fetch_add(1, Ordering::SeqCst);
    }

    /// Start the request for `query` unless smart search was turned off or the
    /// query changed after the timer fired.
    fn dispatch(inner: Arc<Inner>, query: String) {
        let mut id = None;
        inner.state.send_if_modified(|state| {
            if !state.smart_search_enabled || state.query_text != query {
                return false;
            }
            id = Some(inner.latest_request.fetch_add(1, Ordering::SeqCst) + 1);
            state.debounce_pending = false;
            state.is_searching = true;
            true
        });

        let Some(id) = id else {
            tracing::debug!("Skipping smart search for superseded query {:?}", query);
            return;
        };

        tracing::debug!("Smart search #{} dispatched: {:?}", id, query);
        tokio::spawn(Self::run(inner, id, query));
    }

    async fn run(inner: Arc<Inner>, id: u64, query: String) {
        let result = rag::smart_search(inner.provider.as_ref(), &inner.ramo, &query).await;

        let sources = match result {
            Ok(sources) => sources,
            Err(e) => {
                tracing::warn!("Smart search #{} failed, showing no matches: {}", id, e);
                Vec::new()
            }
        };
        let matched = sources.len();

        let applied = inner.state.send_if_modified(|state| {
            if inner.latest_request.load(Ordering::SeqCst) != id {
                return false;
            }
            state.smart_search_results = Some(sources);
            state.is_searching = false;
            true
        });

        if applied {
            tracing::info!("Smart search {:?} matched {} source(s)", query, matched);
        } else {
            tracing::debug!("Discarding stale smart search #{} for {:?}", id, query);
        }
    }
}
