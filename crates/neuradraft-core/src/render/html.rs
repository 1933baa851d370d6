//! HTML renderer
//!
//! Produces a self-contained page with embedded CSS. Consecutive list items
//! are grouped into a single `<ul>`.

use neuradraft_ast::{BodyBlock, Document, HeadingLevel, OutputFormat};

use super::{RenderResult, Renderer};
use crate::blocks::parse_body;
use crate::normalize::normalize;

const STYLESHEET: &str = r#"        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Arial, sans-serif; line-height: 1.6; max-width: 860px; margin: 40px auto; padding: 0 1rem; color: #333; }
        h1 { color: #003366; text-align: center; border-bottom: 2px solid #003366; padding-bottom: 10px; }
        h2 { color: #003366; border-left: 4px solid #003366; padding-left: 10px; margin-top: 2rem; }
        h3 { color: #555; }
        ul { margin: 10px 0; }
        li { margin: 5px 0; }"#;

/// Renders a document as a standalone HTML page
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render to a string
    pub fn render_string(doc: &Document) -> String {
        let title = escape_html(&normalize(&doc.title));
        let mut content = String::new();

        for section in &doc.sections {
            let tag = match section.level {
                HeadingLevel::H2 => "h2",
                HeadingLevel::H3 => "h3",
            };
            content.push_str(&format!(
                "<{tag}>{}</{tag}>\n",
                escape_html(&normalize(&section.heading))
            ));

            let mut in_list = false;
            for block in parse_body(&section.body) {
                match block {
                    BodyBlock::ListItem(text) => {
                        if !in_list {
                            content.push_str("<ul>\n");
                            in_list = true;
                        }
                        content.push_str(&format!("<li>{}</li>\n", escape_html(&text)));
                    }
                    BodyBlock::Paragraph(text) => {
                        if in_list {
                            content.push_str("</ul>\n");
                            in_list = false;
                        }
                        content.push_str(&format!("<p>{}</p>\n", escape_html(&text)));
                    }
                }
            }
            if in_list {
                content.push_str("</ul>\n");
            }
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{STYLESHEET}
    </style>
</head>
<body>
<h1>{title}</h1>
<div class="content">
{content}</div>
</body>
</html>
"#
        )
    }
}

impl Renderer for HtmlRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn render(&self, doc: &Document) -> RenderResult<Vec<u8>> {
        Ok(Self::render_string(doc).into_bytes())
    }
}

/// Escape special HTML characters
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
