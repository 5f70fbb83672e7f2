//! Decoding of the envelope's `answer` field
//!
//! The RAG service double-encodes its payload: `answer` is usually a string
//! holding a JSON document, sometimes with literal control characters inside
//! string values. Decoding walks an ordered list of strategies and stops at
//! the first one that yields JSON.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

/// One way of turning `answer` into a JSON document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// `answer` is already a JSON object
    Structured,
    /// `answer` is a string containing JSON
    EmbeddedJson,
    /// `answer` is a string starting a JSON object with raw newlines/tabs in it
    SanitizedJson,
}

/// Why a strategy produced nothing
#[derive(Debug)]
pub enum StrategyFailure {
    /// The strategy does not apply to this shape of `answer`
    NotApplicable,
    /// The strategy applied but the text did not parse
    Parse(serde_json::Error),
}

impl DecodeStrategy {
    /// Strategies in the order they are tried
    pub const ORDER: [DecodeStrategy; 3] = [
        DecodeStrategy::Structured,
        DecodeStrategy::EmbeddedJson,
        DecodeStrategy::SanitizedJson,
    ];

    /// Run this strategy alone
    pub fn attempt(self, answer: &Value) -> std::result::Result<Value, StrategyFailure> {
        match (self, answer) {
            (DecodeStrategy::Structured, Value::Object(_)) => Ok(answer.clone()),
            (DecodeStrategy::EmbeddedJson, Value::String(text)) => {
                serde_json::from_str(text.trim()).map_err(StrategyFailure::Parse)
            }
            (DecodeStrategy::SanitizedJson, Value::String(text)) => {
                let text = text.trim();
                if !text.starts_with('{') {
                    return Err(StrategyFailure::NotApplicable);
                }
                serde_json::from_str(&escape_control_chars(text)).map_err(StrategyFailure::Parse)
            }
            _ => Err(StrategyFailure::NotApplicable),
        }
    }
}

/// Escape raw newline, carriage return and tab characters
pub fn escape_control_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Turn `answer` into a JSON document, reporting which strategy succeeded
pub fn decode_value(answer: &Value) -> Result<(DecodeStrategy, Value)> {
    let mut last_parse_error = None;

    for strategy in DecodeStrategy::ORDER {
        match strategy.attempt(answer) {
            Ok(value) => {
                if strategy != DecodeStrategy::ORDER[0] {
                    tracing::debug!("Decoded answer with {:?} strategy", strategy);
                }
                return Ok((strategy, value));
            }
            Err(StrategyFailure::NotApplicable) => {}
            Err(StrategyFailure::Parse(e)) => {
                tracing::debug!("{:?} strategy failed: {}", strategy, e);
                last_parse_error = Some(e);
            }
        }
    }

    let preview: String = match answer {
        Value::String(text) => text.chars().take(120).collect(),
        other => other.to_string().chars().take(120).collect(),
    };
    tracing::warn!("Could not decode answer payload: {}", preview);

    Err(Error::malformed(match last_parse_error {
        Some(e) => format!("answer is not valid JSON: {}", e),
        None => format!("answer has unsupported shape: {}", json_kind(answer)),
    }))
}

/// Decode `answer` into a typed payload.
///
/// Unparseable text is `MalformedResponse`; JSON that lacks required fields
/// is `Validation`.
pub fn decode_answer<T: DeserializeOwned>(answer: &Value) -> Result<T> {
    let (_, value) = decode_value(answer)?;
    serde_json::from_value(value).map_err(|e| Error::validation(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
