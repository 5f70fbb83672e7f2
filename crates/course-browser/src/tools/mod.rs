//! Tool views sharing one attached-file selection

pub mod chat;
pub mod flashcards;
pub mod mind_map;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::RagApiConfig;
use crate::error::Error;
use crate::rag::RagProvider;
use crate::selection::Selection;

pub use chat::{ChatMessage, ChatTool, Sender};
pub use flashcards::{Flashcard, FlashcardsTool};
pub use mind_map::MindMapTool;

/// Tool tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolKind {
    #[default]
    Chat,
    Flashcards,
    MindMap,
}

impl ToolKind {
    pub const ALL: [ToolKind; 3] = [ToolKind::Chat, ToolKind::Flashcards, ToolKind::MindMap];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Chat => "chat",
            ToolKind::Flashcards => "flashcards",
            ToolKind::MindMap => "mindmap",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chat" => Ok(ToolKind::Chat),
            "flashcards" | "cards" => Ok(ToolKind::Flashcards),
            "mindmap" | "mind-map" | "map" => Ok(ToolKind::MindMap),
            other => Err(Error::validation(format!("unknown tool: {}", other))),
        }
    }
}

/// The three tools and the active tab
pub struct ToolsPanel {
    active: ToolKind,
    pub chat: ChatTool,
    pub flashcards: FlashcardsTool,
    pub mind_map: MindMapTool,
}

impl ToolsPanel {
    pub fn new(provider: Arc<dyn RagProvider>, config: &RagApiConfig, selection: Selection) -> Self {
        Self {
            active: ToolKind::default(),
            chat: ChatTool::new(Arc::clone(&provider), config.ramo.clone(), selection.clone()),
            flashcards: FlashcardsTool::new(
                provider,
                config.ramo.clone(),
                config.default_flashcards_prompt.clone(),
                selection,
            ),
            mind_map: MindMapTool::default(),
        }
    }

    pub fn active(&self) -> ToolKind {
        self.active
    }

    pub fn set_active(&mut self, kind: ToolKind) {
        if self.active != kind {
            tracing::debug!("Switching tool: {} -> {}", self.active, kind);
            self.active = kind;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::testing::ScriptedProvider;

    #[test]
    fn test_tool_kind_parse() {
        assert_eq!("Chat".parse::<ToolKind>().unwrap(), ToolKind::Chat);
        assert_eq!("cards".parse::<ToolKind>().unwrap(), ToolKind::Flashcards);
        assert_eq!("mind-map".parse::<ToolKind>().unwrap(), ToolKind::MindMap);
        assert!("quiz".parse::<ToolKind>().is_err());
        for kind in ToolKind::ALL {
            assert_eq!(kind.as_str().parse::<ToolKind>().unwrap(), kind);
        }
    }

    #[tokio::test]
    async fn test_tools_share_selection() {
        let provider = Arc::new(ScriptedProvider::default());
        provider.push_ok(crate::rag::testing::envelope(
            serde_json::json!({"flashcards": []}),
            &[],
        ));
        let selection = Selection::new();
        let mut panel = ToolsPanel::new(provider, &RagApiConfig::default(), selection.clone());
        assert_eq!(panel.active(), ToolKind::Chat);

        selection.toggle("a/Tarea_1.pdf");
        assert!(panel.chat.can_send());

        panel.set_active(ToolKind::Flashcards);
        panel.flashcards.generate().await.unwrap();

        assert!(selection.is_empty());
        assert!(!panel.chat.can_send());
    }
}
