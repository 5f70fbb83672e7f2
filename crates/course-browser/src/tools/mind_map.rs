//! Read-only mind map view

use std::path::Path;

use crate::error::Result;
use crate::types::{MindMapData, MindMapNode};

/// Mind map tool; shows the sample tree until a map is loaded
#[derive(Debug, Clone, Default)]
pub struct MindMapTool {
    data: MindMapData,
}

impl MindMapTool {
    pub fn new(data: MindMapData) -> Self {
        Self { data }
    }

    /// Load a map from a JSON file shaped like `{"root": {...}}`
    pub async fn load_json(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let data: MindMapData = serde_json::from_str(&raw)?;
        tracing::debug!("Loaded mind map with {} node(s) from {:?}", data.root.count(), path);
        Ok(Self { data })
    }

    pub fn data(&self) -> &MindMapData {
        &self.data
    }

    pub fn node_count(&self) -> usize {
        self.data.root.count()
    }

    pub fn depth(&self) -> usize {
        self.data.root.depth()
    }

    /// One line per node, indented two spaces per level
    pub fn outline(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.node_count());
        push_outline(&self.data.root, 0, &mut lines);
        lines
    }
}

fn push_outline(node: &MindMapNode, level: usize, lines: &mut Vec<String>) {
    let bullet = if level == 0 { "" } else { "- " };
    lines.push(format!("{}{}{}", "  ".repeat(level.saturating_sub(1)), bullet, node.label));
    for child in &node.children {
        push_outline(child, level + 1, lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sample_tree() {
        let tool = MindMapTool::default();
        assert_eq!(tool.node_count(), 17);
        assert_eq!(tool.depth(), 3);

        let outline = tool.outline();
        assert_eq!(outline.len(), 17);
        assert_eq!(outline[0], "React");
        assert_eq!(outline[1], "- Componentes");
        assert_eq!(outline[2], "  - Funcionales");
    }

    #[tokio::test]
    async fn test_load_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"root": {{"id": "r", "label": "Grafos", "children": [{{"id": "a", "label": "BFS"}}]}}}}"#
        )
        .unwrap();

        let tool = MindMapTool::load_json(file.path()).await.unwrap();
        assert_eq!(tool.node_count(), 2);
        assert_eq!(tool.outline(), vec!["Grafos", "- BFS"]);
    }

    #[tokio::test]
    async fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"root\": 3}}").unwrap();
        assert!(MindMapTool::load_json(file.path()).await.is_err());
    }
}
