//! Core types for the course browser

pub mod file;
pub mod mind_map;
pub mod payload;
pub mod query;

pub use file::{Download, FileEntry};
pub use mind_map::{MindMapData, MindMapNode};
pub use payload::{
    Confidence, Difficulty, FlashcardData, FlashcardsPayload, MatchingFile, PageRef, QaPayload,
    SearchPayload,
};
pub use query::{Envelope, QueryMode, QueryRequest};
