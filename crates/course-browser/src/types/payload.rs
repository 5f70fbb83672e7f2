//! Mode-specific payloads carried in the envelope's `answer` field

use serde::{Deserialize, Serialize};

/// Confidence / relevance grade used by the RAG API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::High => "alta",
            Confidence::Medium => "media",
            Confidence::Low => "baja",
        }
    }
}

/// Flashcard difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "fácil",
            Difficulty::Medium => "media",
            Difficulty::Hard => "difícil",
        }
    }
}

/// A page within a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRef {
    pub file: String,
    pub page: u32,
}

impl PageRef {
    /// Inline citation text, e.g. "Clase 3, pág 12"
    pub fn format_inline(&self) -> String {
        format!("{}, pág {}", self.file, self.page)
    }
}

/// QA mode payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaPayload {
    /// Answer text
    pub answer: String,
    #[serde(default)]
    pub confidence: Option<Confidence>,
    /// Pages the answer cites
    #[serde(default)]
    pub sources: Vec<PageRef>,
    /// What the documents could not answer
    #[serde(default)]
    pub limitations: Option<String>,
    /// Suggested follow-up questions
    #[serde(default)]
    pub followups: Vec<String>,
}

/// One file matched by a content search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingFile {
    pub file: String,
    pub relevance: Confidence,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub matching_topics: Vec<String>,
    #[serde(default)]
    pub sample_content: String,
}

/// Search mode payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload {
    pub matching_files: Vec<MatchingFile>,
    #[serde(default)]
    pub total_matches: Option<u32>,
    #[serde(default)]
    pub search_summary: String,
    #[serde(default)]
    pub no_matches_reason: Option<String>,
}

/// One generated flashcard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardData {
    pub id: u32,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub source: Option<PageRef>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub topic: Option<String>,
}

/// Flashcards mode payload.
///
/// `flashcards` is mandatory; the summary fields are tolerated when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardsPayload {
    pub flashcards: Vec<FlashcardData>,
    #[serde(default)]
    pub total_generated: Option<u32>,
    #[serde(default)]
    pub topics_covered: Vec<String>,
}
