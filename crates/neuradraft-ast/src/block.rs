//! Block-level elements of a section body
//!
//! Section bodies are stored raw. Renderers turn them into a flat list of
//! paragraphs and bulleted list items before emitting their own markup.

use serde::{Deserialize, Serialize};

/// A normalized unit of body content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyBlock {
    /// A paragraph of plain text
    Paragraph(String),
    /// A bulleted list item, marker already stripped
    ListItem(String),
}

impl BodyBlock {
    /// Text content of the block
    pub fn text(&self) -> &str {
        match self {
            BodyBlock::Paragraph(text) | BodyBlock::ListItem(text) => text,
        }
    }

    /// Check if this block is a list item
    pub fn is_list_item(&self) -> bool {
        matches!(self, BodyBlock::ListItem(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_text() {
        assert_eq!(BodyBlock::Paragraph("a".into()).text(), "a");
        assert_eq!(BodyBlock::ListItem("b".into()).text(), "b");
    }

    #[test]
    fn test_is_list_item() {
        assert!(BodyBlock::ListItem("x".into()).is_list_item());
        assert!(!BodyBlock::Paragraph("x".into()).is_list_item());
    }
}
