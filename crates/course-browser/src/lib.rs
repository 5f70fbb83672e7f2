//! course-browser: course file browser with RAG-backed search, chat and flashcards
//!
//! Lists course files through an object store gateway, filters them by name
//! or by content through a debounced smart search against a RAG API, and
//! feeds a shared selection of attached files to the chat, flashcards and
//! mind map tools.

pub mod browser;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod naming;
pub mod rag;
pub mod search;
pub mod selection;
pub mod tools;
pub mod types;

pub use browser::{Browser, LoadState};
pub use config::BrowserConfig;
pub use error::{Error, Result};
pub use gateway::{FileGateway, GatewayClient};
pub use rag::{RagClient, RagProvider};
pub use search::{SearchOrchestrator, SearchPhase, SearchState};
pub use selection::Selection;
pub use tools::{ToolKind, ToolsPanel};
pub use types::{
    Envelope, FileEntry, FlashcardData, FlashcardsPayload, MindMapData, QaPayload, QueryMode,
    QueryRequest, SearchPayload,
};
