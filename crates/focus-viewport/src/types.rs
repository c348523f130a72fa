//! Diagram data handed in by the canvas
//!
//! Positions and edges are owned by the canvas. This crate only reads them;
//! edges are carried through to the render frame untouched.

use std::fmt;

use egui::Pos2;
use serde::{Deserialize, Serialize};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Stable node identifier assigned by the canvas
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

// =============================================================================
// CONTENT
// =============================================================================

/// One block of node content
///
/// Text is pre-sanitised data from the authoring side. Nothing here is
/// interpreted as markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentBlock {
    Title(String),
    Paragraph(String),
}

impl ContentBlock {
    pub fn text(&self) -> &str {
        match self {
            ContentBlock::Title(text) | ContentBlock::Paragraph(text) => text,
        }
    }

    pub fn is_title(&self) -> bool {
        matches!(self, ContentBlock::Title(_))
    }
}

/// Ordered content of a node. Block 0 is the title.
///
/// Blocks are written as single-key maps (`- title: heading`) in YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeContent {
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub blocks: Vec<ContentBlock>,
}

impl NodeContent {
    pub fn new(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }

    /// Title followed by paragraphs
    pub fn with_title(title: impl Into<String>, paragraphs: &[&str]) -> Self {
        let mut blocks = Vec::with_capacity(paragraphs.len() + 1);
        blocks.push(ContentBlock::Title(title.into()));
        blocks.extend(paragraphs.iter().map(|p| ContentBlock::Paragraph(p.to_string())));
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Title-equivalent block: the explicit title if there is one, otherwise
    /// whatever block comes first.
    pub fn title(&self) -> Option<&ContentBlock> {
        self.blocks
            .iter()
            .find(|b| b.is_title())
            .or_else(|| self.blocks.first())
    }

    /// First `count` blocks, with the title-equivalent always leading
    pub fn visible(&self, count: usize) -> Vec<&ContentBlock> {
        let Some(title) = self.title() else {
            return Vec::new();
        };
        std::iter::once(title)
            .chain(self.blocks.iter().filter(|b| !std::ptr::eq(*b, title)))
            .take(count)
            .collect()
    }
}

// =============================================================================
// NODES / EDGES
// =============================================================================

/// Node as seen by the viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    pub id: NodeId,
    /// World position, owned by the canvas
    pub position: Pos2,
    #[serde(default)]
    pub content: NodeContent,
}

impl DiagramNode {
    pub fn new(id: impl Into<NodeId>, position: Pos2, content: NodeContent) -> Self {
        Self {
            id: id.into(),
            position,
            content,
        }
    }
}

/// Edge between two nodes. Opaque to the viewport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

/// What a click on the canvas landed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickTarget {
    Node(NodeId),
    Background,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_first_even_when_out_of_order() {
        let content = NodeContent::new(vec![
            ContentBlock::Paragraph("body".into()),
            ContentBlock::Title("heading".into()),
            ContentBlock::Paragraph("more".into()),
        ]);

        let visible = content.visible(2);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].text(), "heading");
        assert_eq!(visible[1].text(), "body");
    }

    #[test]
    fn test_missing_title_uses_first_block() {
        let content = NodeContent::new(vec![
            ContentBlock::Paragraph("first".into()),
            ContentBlock::Paragraph("second".into()),
        ]);

        assert_eq!(content.title().map(|b| b.text()), Some("first"));
        assert_eq!(content.visible(1)[0].text(), "first");
    }

    #[test]
    fn test_empty_content_shows_nothing() {
        let content = NodeContent::default();
        assert!(content.title().is_none());
        assert!(content.visible(3).is_empty());
    }

    #[test]
    fn test_node_yaml_shape() {
        let yaml = r#"
id: "1"
position: { x: 750, y: 300 }
content:
  - title: heading 1
  - paragraph: some text
"#;
        let node: DiagramNode = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(node.id, NodeId::from("1"));
        assert_eq!(node.position, Pos2::new(750.0, 300.0));
        assert_eq!(node.content.len(), 2);
        assert!(node.content.blocks[0].is_title());
    }

    #[test]
    fn test_content_yaml_round_trip_keeps_map_shape() {
        let content = NodeContent::with_title("heading", &["body"]);
        let yaml = serde_yaml::to_string(&content).unwrap();
        assert!(yaml.contains("- title: heading"));
        assert_eq!(serde_yaml::from_str::<NodeContent>(&yaml).unwrap(), content);
    }
}
