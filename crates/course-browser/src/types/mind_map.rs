//! Mind map tree

use serde::{Deserialize, Serialize};

/// A node of the mind map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapNode {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MindMapNode>,
}

impl MindMapNode {
    pub fn leaf(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            children: Vec::new(),
        }
    }

    pub fn branch(id: &str, label: &str, children: Vec<MindMapNode>) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            children,
        }
    }

    /// Nodes in this subtree, including self
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(MindMapNode::count).sum::<usize>()
    }

    /// Levels in this subtree; a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(MindMapNode::depth).max().unwrap_or(0)
    }
}

/// A complete mind map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapData {
    pub root: MindMapNode,
}

impl Default for MindMapData {
    fn default() -> Self {
        Self {
            root: MindMapNode::branch(
                "root",
                "React",
                vec![
                    MindMapNode::branch(
                        "components",
                        "Componentes",
                        vec![
                            MindMapNode::leaf("functional", "Funcionales"),
                            MindMapNode::leaf("class", "De Clase"),
                            MindMapNode::leaf("hoc", "HOC"),
                        ],
                    ),
                    MindMapNode::branch(
                        "hooks",
                        "Hooks",
                        vec![
                            MindMapNode::leaf("useState", "useState"),
                            MindMapNode::leaf("useEffect", "useEffect"),
                            MindMapNode::leaf("useContext", "useContext"),
                            MindMapNode::leaf("useRef", "useRef"),
                        ],
                    ),
                    MindMapNode::branch(
                        "state",
                        "Estado",
                        vec![
                            MindMapNode::leaf("local", "Local"),
                            MindMapNode::leaf("global", "Global"),
                            MindMapNode::leaf("redux", "Redux"),
                        ],
                    ),
                    MindMapNode::branch(
                        "routing",
                        "Enrutamiento",
                        vec![
                            MindMapNode::leaf("react-router", "React Router"),
                            MindMapNode::leaf("next-router", "Next.js Router"),
                        ],
                    ),
                ],
            ),
        }
    }
}
