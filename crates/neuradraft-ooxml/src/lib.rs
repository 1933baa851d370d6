//! # neuradraft-ooxml
//!
//! DOCX (Office Open XML) rendering for neuradraft.
//!
//! This crate provides functionality to:
//! - Write a document as a complete WordprocessingML package
//! - Reuse a Word template's styles and page setup
//!
//! ## Example
//!
//! ```no_run
//! use neuradraft_core::build_document;
//! use neuradraft_ooxml::DocxRenderer;
//!
//! let doc = build_document("Guide: Tea", "## Brewing\n- Boil water\n- Steep");
//! let bytes = DocxRenderer::new().render_docx(&doc)?;
//! std::fs::write("tea.docx", bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archive;
pub mod error;
pub mod package;
pub mod relationships;
pub mod template;
pub mod writer;

#[cfg(test)]
mod test_utils;

use std::path::Path;

use neuradraft_ast::{Document, OutputFormat};
use neuradraft_core::render::{RenderError, RenderResult, Renderer};

pub use archive::OoxmlArchive;
pub use error::{OoxmlError, Result};
pub use relationships::Relationships;
pub use template::Template;
pub use writer::DocxWriter;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// DOCX renderer, optionally based on a template
#[derive(Debug, Clone, Default)]
pub struct DocxRenderer {
    template: Option<Template>,
}

impl DocxRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the template at `path`; it is validated immediately
    pub fn with_template_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            template: Some(Template::load(path)?),
        })
    }

    pub fn with_template(template: Template) -> Self {
        Self {
            template: Some(template),
        }
    }

    pub fn render_docx(&self, doc: &Document) -> Result<Vec<u8>> {
        match &self.template {
            Some(template) => DocxWriter::generate_with_template(doc, template.clone()),
            None => DocxWriter::generate(doc),
        }
    }
}

impl Renderer for DocxRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Docx
    }

    fn render(&self, doc: &Document) -> RenderResult<Vec<u8>> {
        self.render_docx(doc)
            .map_err(|e| RenderError::backend(OutputFormat::Docx, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuradraft_ast::Section;

    #[test]
    fn test_renderer_produces_zip() {
        let doc = Document::new("T", vec![Section::introduction("hello")]);
        let bytes = DocxRenderer::new().render(&doc).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_missing_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = DocxRenderer::with_template_file(dir.path().join("missing.dotx"));
        assert!(matches!(result, Err(OoxmlError::Io(_))));
    }

    #[test]
    fn test_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corp.dotx");
        std::fs::write(&path, test_utils::styled_template()).unwrap();

        let renderer = DocxRenderer::with_template_file(&path).unwrap();
        assert_eq!(renderer.format(), OutputFormat::Docx);
        let doc = Document::new("T", vec![Section::introduction("- a")]);
        let bytes = renderer.render(&doc).unwrap();
        let archive = OoxmlArchive::from_reader(std::io::Cursor::new(bytes)).unwrap();
        assert!(archive.contains("word/numbering.xml"));
    }
}
