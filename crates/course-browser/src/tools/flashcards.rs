//! Flashcard generation from attached files

use std::sync::Arc;

use crate::error::Result;
use crate::rag::{self, RagProvider};
use crate::selection::Selection;
use crate::types::FlashcardData;

/// A generated card with its reveal state
#[derive(Debug, Clone, PartialEq)]
pub struct Flashcard {
    pub data: FlashcardData,
    pub flipped: bool,
}

impl Flashcard {
    /// Switch between question and answer; returns the new state
    pub fn flip(&mut self) -> bool {
        self.flipped = !self.flipped;
        self.flipped
    }

    /// Text on the visible face
    pub fn face(&self) -> &str {
        if self.flipped {
            &self.data.answer
        } else {
            &self.data.question
        }
    }
}

impl From<FlashcardData> for Flashcard {
    fn from(data: FlashcardData) -> Self {
        Self { data, flipped: false }
    }
}

/// Flashcards tool state
pub struct FlashcardsTool {
    provider: Arc<dyn RagProvider>,
    ramo: String,
    selection: Selection,
    default_prompt: String,
    prompt: String,
    cards: Vec<Flashcard>,
    topics: Vec<String>,
    is_loading: bool,
    error: Option<String>,
}

impl FlashcardsTool {
    pub fn new(
        provider: Arc<dyn RagProvider>,
        ramo: impl Into<String>,
        default_prompt: impl Into<String>,
        selection: Selection,
    ) -> Self {
        Self {
            provider,
            ramo: ramo.into(),
            selection,
            default_prompt: default_prompt.into(),
            prompt: String::new(),
            cards: Vec::new(),
            topics: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.prompt = text.into();
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut [Flashcard] {
        &mut self.cards
    }

    /// Topics reported by the last successful generation
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Generate cards from the prompt (or the default prompt when blank) and
    /// the attached files. Returns the number of cards received; `Ok(0)` with
    /// no request sent while a generation is already running.
    pub async fn generate(&mut self) -> Result<usize> {
        if self.is_loading {
            return Ok(0);
        }

        let prompt = match self.prompt.trim() {
            "" => self.default_prompt.clone(),
            text => text.to_string(),
        };
        let attached = self.selection.snapshot();

        self.is_loading = true;
        self.error = None;

        let provider = Arc::clone(&self.provider);
        let request = rag::generate_flashcards(provider.as_ref(), &self.ramo, &prompt, &attached);
        self.selection.clear();
        tracing::info!("Generating flashcards from {} attached file(s)", attached.len());

        let result = request.await;
        self.is_loading = false;

        match result {
            Ok(answered) => {
                let payload = answered.data;
                self.cards = payload.flashcards.into_iter().map(Flashcard::from).collect();
                self.topics = payload.topics_covered;
                self.prompt.clear();
                tracing::info!("Received {} flashcard(s)", self.cards.len());
                Ok(self.cards.len())
            }
            Err(e) => {
                tracing::warn!("Flashcard generation failed: {}", e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
