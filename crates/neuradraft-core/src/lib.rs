//! neuradraft-core - From generated markdown to rendered documents
//!
//! Core library for neuradraft, providing section splitting, text
//! normalization, the plain text and HTML renderers, multi-format dispatch
//! and the document wizard session.
//!
//! # Example
//!
//! ```
//! use neuradraft_core::{build_document, normalize};
//! use neuradraft_core::render::{PlainTextRenderer, Renderer};
//!
//! let doc = build_document("Guide: Tea", "Intro line\n## Brewing\n- **Boil** water\n- Steep");
//! assert_eq!(doc.sections.len(), 2);
//! assert_eq!(doc.sections[1].heading, "Brewing");
//!
//! let text = PlainTextRenderer::render_string(&doc);
//! assert!(text.contains("  * Boil water"));
//! assert_eq!(normalize("**x**"), "x");
//! ```

pub mod blocks;
pub mod filename;
pub mod normalize;
pub mod prompts;
pub mod provider;
pub mod render;
pub mod session;
pub mod splitter;

use neuradraft_ast::Document;

// Re-export main types and functions
pub use blocks::parse_body;
pub use filename::{artifact_file_name, base_file_name, document_title, sanitize_file_name};
pub use normalize::{normalize, to_legacy_encoding, to_legacy_encoding_with, LegacyCharset};
pub use provider::{ModelProvider, ProviderError};
pub use render::{RenderError, RenderResult, Renderer};
pub use session::{Exchange, ExchangeKind, Session, SessionError, WizardState};
pub use splitter::split_into_sections;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build an immutable document from a title and markdown content
pub fn build_document(title: impl Into<String>, markdown: &str) -> Document {
    Document::new(title, split_into_sections(markdown))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }

    #[test]
    fn test_build_document() {
        let doc = build_document("T", "## A\nfoo");
        assert_eq!(doc.title, "T");
        assert_eq!(doc.sections.len(), 1);
    }
}
