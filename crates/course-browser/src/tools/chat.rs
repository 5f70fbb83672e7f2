//! Q&A chat over the attached files

use std::sync::Arc;

use crate::error::Result;
use crate::naming;
use crate::rag::{self, RagProvider};
use crate::selection::Selection;
use crate::types::QaPayload;

/// Prompt sent when the user attaches files without typing anything
const ATTACHMENTS_ONLY_PROMPT: &str = "Resume el contenido de los archivos adjuntos.";

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One entry of the conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    /// Keys attached to a user message
    pub attached_files: Vec<String>,
    /// Structured answer behind a bot message
    pub answer: Option<QaPayload>,
    /// Source names the answer drew from
    pub sources: Vec<String>,
}

impl ChatMessage {
    /// Display names of the attached files
    pub fn attachment_names(&self) -> Vec<&str> {
        self.attached_files.iter().map(|k| naming::base_name(k)).collect()
    }
}

/// Chat tool state
pub struct ChatTool {
    provider: Arc<dyn RagProvider>,
    ramo: String,
    selection: Selection,
    messages: Vec<ChatMessage>,
    input: String,
    is_loading: bool,
    error: Option<String>,
    next_id: u64,
}

impl ChatTool {
    pub fn new(provider: Arc<dyn RagProvider>, ramo: impl Into<String>, selection: Selection) -> Self {
        Self {
            provider,
            ramo: ramo.into(),
            selection,
            messages: Vec::new(),
            input: String::new(),
            is_loading: false,
            error: None,
            next_id: 1,
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Inline error from the last failed send
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether `send` would do anything
    pub fn can_send(&self) -> bool {
        !self.is_loading && (!self.input.trim().is_empty() || !self.selection.is_empty())
    }

    fn push(&mut self, sender: Sender, text: String) -> &mut ChatMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            sender,
            text,
            attached_files: Vec::new(),
            answer: None,
            sources: Vec::new(),
        });
        let last = self.messages.len() - 1;
        &mut self.messages[last]
    }

    /// Send the input with the attached files.
    ///
    /// Returns `Ok(false)` when there was nothing to send. The selection is
    /// cleared as soon as the request is dispatched. On failure the input is
    /// kept and the error text is recorded for display.
    pub async fn send(&mut self) -> Result<bool> {
        if !self.can_send() {
            return Ok(false);
        }

        let text = self.input.trim().to_string();
        let attached = self.selection.snapshot();
        let prompt = if text.is_empty() {
            ATTACHMENTS_ONLY_PROMPT.to_string()
        } else {
            text.clone()
        };

        self.push(Sender::User, text).attached_files = attached.clone();
        self.is_loading = true;
        self.error = None;

        let provider = Arc::clone(&self.provider);
        let request = rag::ask(provider.as_ref(), &self.ramo, &prompt, &attached);
        self.selection.clear();
        tracing::info!("Chat question sent with {} attached file(s)", attached.len());

        let result = request.await;
        self.is_loading = false;

        match result {
            Ok(answered) => {
                let message = self.push(Sender::Bot, answered.data.answer.clone());
                message.sources = answered.sources;
                message.answer = Some(answered.data);
                self.input.clear();
                Ok(true)
            }
            Err(e) => {
                tracing::warn!("Chat request failed: {}", e);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::rag::testing::{envelope, ScriptedProvider};
    use serde_json::json;

    fn tool(provider: &Arc<ScriptedProvider>, selection: &Selection) -> ChatTool {
        ChatTool::new(provider.clone(), "CII-2750", selection.clone())
    }

    #[tokio::test]
    async fn test_send_appends_question_and_answer() {
        let provider = Arc::new(ScriptedProvider::default());
        provider.push_ok(envelope(
            json!("{\"answer\": \"Es un acuerdo\", \"confidence\": \"high\", \"sources\": [{\"file\": \"Clase 3\", \"page\": 4}]}"),
            &["Clase 3"],
        ));
        let selection = Selection::new();
        selection.toggle("plan-comun/CII-2750/Clase 3.pdf");

        let mut chat = tool(&provider, &selection);
        chat.set_input("  ¿Qué es un SLA?  ");
        assert!(chat.send().await.unwrap());

        let messages = chat.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].text, "¿Qué es un SLA?");
        assert_eq!(messages[0].attachment_names(), vec!["Clase 3.pdf"]);
        assert_eq!(messages[1].sender, Sender::Bot);
        assert_eq!(messages[1].text, "Es un acuerdo");
        assert_eq!(messages[1].sources, vec!["Clase 3"]);

        assert!(chat.input().is_empty());
        assert!(selection.is_empty());

        let sent = provider.requests.lock()[0].clone();
        assert_eq!(sent.files, Some(vec!["Clase 3".to_string()]));
    }

    #[tokio::test]
    async fn test_nothing_to_send() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut chat = tool(&provider, &Selection::new());
        chat.set_input("   ");

        assert!(!chat.send().await.unwrap());
        assert!(provider.requests.lock().is_empty());
        assert!(chat.messages().is_empty());
    }

    #[tokio::test]
    async fn test_attachments_only_uses_default_prompt() {
        let provider = Arc::new(ScriptedProvider::default());
        provider.push_ok(envelope(json!({"answer": "Resumen"}), &[]));
        let selection = Selection::new();
        selection.toggle("x/Guia-2.pdf");

        let mut chat = tool(&provider, &selection);
        assert!(chat.send().await.unwrap());
        assert_eq!(provider.prompts(), vec![ATTACHMENTS_ONLY_PROMPT]);
    }

    #[tokio::test]
    async fn test_failure_keeps_input_but_not_selection() {
        let provider = Arc::new(ScriptedProvider::default());
        provider.push_err(Error::remote(500));
        let selection = Selection::new();
        selection.toggle("x/Guia-2.pdf");

        let mut chat = tool(&provider, &selection);
        chat.set_input("¿Cuándo es el control?");
        assert!(chat.send().await.is_err());

        assert_eq!(chat.input(), "¿Cuándo es el control?");
        assert_eq!(chat.error(), Some("Error en la API: 500"));
        assert!(selection.is_empty());
        assert!(!chat.is_loading());
        assert_eq!(chat.messages().len(), 1);
    }

    #[tokio::test]
    async fn test_undecodable_answer_surfaces_error() {
        let provider = Arc::new(ScriptedProvider::default());
        provider.push_ok(envelope(json!("respuesta en texto plano"), &[]));

        let mut chat = tool(&provider, &Selection::new());
        chat.set_input("hola");
        let err = chat.send().await.unwrap_err();

        assert!(matches!(err, Error::MalformedResponse(_)));
        assert_eq!(chat.error(), Some("Error al parsear la respuesta de la API"));
    }
}
