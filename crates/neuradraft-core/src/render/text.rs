//! Plain text renderer

use neuradraft_ast::{BodyBlock, Document, HeadingLevel, OutputFormat};

use super::{RenderResult, Renderer};
use crate::blocks::parse_body;
use crate::normalize::normalize;

/// Renders a document as UTF-8 plain text
///
/// ```text
/// Report: Solar
/// =============
///
/// Introduction
/// ------------
///
/// Paragraph text.
///
///   * list item
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextRenderer;

impl PlainTextRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render to a string
    pub fn render_string(doc: &Document) -> String {
        let mut output = String::new();

        let title = normalize(&doc.title);
        output.push_str(&title);
        output.push('\n');
        output.push_str(&"=".repeat(title.chars().count()));
        output.push('\n');

        for section in &doc.sections {
            let heading = normalize(&section.heading);
            output.push('\n');
            output.push_str(&heading);
            output.push('\n');
            if section.level == HeadingLevel::H2 {
                output.push_str(&"-".repeat(heading.chars().count()));
                output.push('\n');
            }

            let mut previous_was_item = false;
            for block in parse_body(&section.body) {
                match block {
                    BodyBlock::Paragraph(text) => {
                        output.push('\n');
                        output.push_str(&text);
                        output.push('\n');
                        previous_was_item = false;
                    }
                    BodyBlock::ListItem(text) => {
                        if !previous_was_item {
                            output.push('\n');
                        }
                        output.push_str("  * ");
                        output.push_str(&text);
                        output.push('\n');
                        previous_was_item = true;
                    }
                }
            }
        }

        output
    }
}

impl Renderer for PlainTextRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Txt
    }

    fn render(&self, doc: &Document) -> RenderResult<Vec<u8>> {
        Ok(Self::render_string(doc).into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuradraft_ast::Section;

    #[test]
    fn test_render_text() {
        let doc = Document::new(
            "Guide: Tea",
            vec![
                Section::introduction("Tea is **good**."),
                Section::new("Kinds", HeadingLevel::H3, "- green\n- black\nAfter list."),
            ],
        );
        let text = PlainTextRenderer::render_string(&doc);
        assert_eq!(
            text,
            "Guide: Tea\n==========\n\nIntroduction\n------------\n\nTea is good.\n\nKinds\n\n  * green\n  * black\n\nAfter list.\n"
        );
    }

    #[test]
    fn test_title_is_normalized() {
        let doc = Document::new("Report: A \u{2014} B", vec![]);
        let text = PlainTextRenderer::render_string(&doc);
        assert!(text.starts_with("Report: A - B\n=============\n"));
    }

    #[test]
    fn test_keeps_unicode() {
        let doc = Document::new("T", vec![Section::introduction("caf\u{e9}")]);
        let bytes = PlainTextRenderer::new().render(&doc).unwrap();
        assert!(String::from_utf8(bytes).unwrap().contains("caf\u{e9}"));
    }
}
