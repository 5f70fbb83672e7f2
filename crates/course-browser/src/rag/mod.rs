//! RAG API access: provider trait, HTTP client and answer decoding

pub mod client;
pub mod decode;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    Envelope, FlashcardsPayload, QaPayload, QueryMode, QueryRequest, SearchPayload,
};

pub use client::RagClient;
pub use decode::{decode_answer, DecodeStrategy, StrategyFailure};

/// Trait for the external answering service
///
/// Implementations:
/// - `RagClient`: HTTP client for `POST /api/query`
#[async_trait]
pub trait RagProvider: Send + Sync {
    /// Send one query and return the undecoded envelope
    async fn query(&self, request: QueryRequest) -> Result<Envelope>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// A decoded payload together with the envelope's source list
#[derive(Debug, Clone, PartialEq)]
pub struct Answered<T> {
    pub data: T,
    pub sources: Vec<String>,
}

/// Ask a question about the attached files
pub async fn ask<S: AsRef<str>>(
    provider: &dyn RagProvider,
    ramo: &str,
    prompt: &str,
    files: &[S],
) -> Result<Answered<QaPayload>> {
    let request = QueryRequest::new(prompt, QueryMode::Qa, ramo)
        .with_files(files)
        .with_rag(true);
    let envelope = provider.query(request).await?;
    Ok(Answered {
        data: envelope.decode()?,
        sources: envelope.sources,
    })
}

/// Content search; returns the source names the service matched
pub async fn smart_search(provider: &dyn RagProvider, ramo: &str, query: &str) -> Result<Vec<String>> {
    let envelope = provider
        .query(QueryRequest::new(query, QueryMode::Search, ramo))
        .await?;
    Ok(envelope.sources)
}

/// Content search with the structured per-file explanation decoded
pub async fn search_details(
    provider: &dyn RagProvider,
    ramo: &str,
    query: &str,
) -> Result<Answered<SearchPayload>> {
    let envelope = provider
        .query(QueryRequest::new(query, QueryMode::Search, ramo))
        .await?;
    Ok(Answered {
        data: envelope.decode()?,
        sources: envelope.sources,
    })
}

/// Generate flashcards from the attached files
pub async fn generate_flashcards<S: AsRef<str>>(
    provider: &dyn RagProvider,
    ramo: &str,
    prompt: &str,
    files: &[S],
) -> Result<Answered<FlashcardsPayload>> {
    let request = QueryRequest::new(prompt, QueryMode::Flashcards, ramo).with_files(files);
    let envelope = provider.query(request).await?;
    Ok(Answered {
        data: envelope.decode()?,
        sources: envelope.sources,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory provider for unit tests

    use super::*;
    use crate::error::Error;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Records every request and replays scripted responses (default: empty search)
    #[derive(Default)]
    pub struct ScriptedProvider {
        pub requests: Mutex<Vec<QueryRequest>>,
        pub responses: Mutex<VecDeque<Result<Envelope>>>,
    }

    impl ScriptedProvider {
        pub fn push_ok(&self, envelope: Envelope) {
            self.responses.lock().push_back(Ok(envelope));
        }

        pub fn push_err(&self, err: Error) {
            self.responses.lock().push_back(Err(err));
        }

        pub fn prompts(&self) -> Vec<String> {
            self.requests.lock().iter().map(|r| r.prompt.clone()).collect()
        }
    }

    #[async_trait]
    impl RagProvider for ScriptedProvider {
        async fn query(&self, request: QueryRequest) -> Result<Envelope> {
            self.requests.lock().push(request);
            self.responses.lock().pop_front().unwrap_or_else(|| {
                Ok(Envelope {
                    answer: serde_json::Value::String("{}".to_string()),
                    sources: Vec::new(),
                    ramo: String::new(),
                })
            })
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    pub fn envelope(answer: serde_json::Value, sources: &[&str]) -> Envelope {
        Envelope {
            answer,
            sources: sources.iter().map(|s| s.to_string()).collect(),
            ramo: "CII-2750".to_string(),
        }
    }
}
