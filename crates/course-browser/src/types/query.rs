//! RAG API request and envelope types

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::naming::extract_file_name;
use crate::rag::decode;

/// Answering mode requested from the RAG API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Question answering over the attached documents
    Qa,
    /// Content-based file search
    Search,
    /// Flashcard generation
    Flashcards,
}

impl QueryMode {
    /// Whether attached files are sent for this mode
    pub fn accepts_files(&self) -> bool {
        matches!(self, Self::Qa | Self::Flashcards)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Qa => "qa",
            Self::Search => "search",
            Self::Flashcards => "flashcards",
        }
    }
}

/// Body of `POST /api/query`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// User prompt or search text
    pub prompt: String,
    /// Course identifier
    pub ramo: String,
    /// Answering mode
    pub mode: QueryMode,
    /// De-pathed, de-extensioned names of the attached files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    /// Ask the service to ground the answer in retrieved chunks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_rag: Option<bool>,
}

impl QueryRequest {
    /// Create a new request
    pub fn new(prompt: impl Into<String>, mode: QueryMode, ramo: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ramo: ramo.into(),
            mode,
            files: None,
            use_rag: None,
        }
    }

    /// Attach files by storage key.
    ///
    /// Keys are reduced to bare file names. Nothing is attached when the list
    /// is empty or the mode does not take files.
    pub fn with_files<S: AsRef<str>>(mut self, keys: &[S]) -> Self {
        if !self.mode.accepts_files() || keys.is_empty() {
            self.files = None;
            return self;
        }
        self.files = Some(keys.iter().map(|k| extract_file_name(k.as_ref())).collect());
        self
    }

    /// Set the `use_rag` flag
    pub fn with_rag(mut self, use_rag: bool) -> Self {
        self.use_rag = Some(use_rag);
        self
    }
}

/// Outer response object of the RAG API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Mode-specific payload, either structured or a JSON document in a string
    pub answer: serde_json::Value,
    /// Source file names the answer drew from
    #[serde(default)]
    pub sources: Vec<String>,
    /// Course identifier echoed back
    #[serde(default)]
    pub ramo: String,
}

impl Envelope {
    /// Decode `answer` into a mode-specific payload
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        decode::decode_answer(&self.answer)
    }
}
