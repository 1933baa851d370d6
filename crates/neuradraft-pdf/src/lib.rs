//! neuradraft-pdf - PDF rendering via Typst
//!
//! # Architecture
//!
//! The PDF pipeline consists of two stages:
//!
//! 1. **Transpiler** - Converts a `neuradraft_ast::Document` to Typst markup
//! 2. **Compiler** - Compiles Typst markup to PDF bytes
//!
//! [`PdfRenderer`] runs both and, when the structured layout fails, retries
//! once with a minimal layout holding only the title and the plain content.
//!
//! # Example
//!
//! ```ignore
//! use neuradraft_core::build_document;
//! use neuradraft_pdf::render_pdf;
//!
//! let doc = build_document("Article: Bees", "## Hives\nBees live in hives.");
//! let pdf_bytes = render_pdf(&doc)?;
//! ```

mod compiler;
mod error;
mod transpiler;

use std::path::Path;

use neuradraft_ast::{Document, OutputFormat};
use neuradraft_core::render::{RenderError, RenderResult, Renderer};

pub use compiler::{load_fonts, Compiler};
pub use error::{PdfError, Result};
pub use transpiler::Transpiler;

/// Render a document to PDF with the default fonts
pub fn render_pdf(doc: &Document) -> Result<Vec<u8>> {
    PdfRenderer::new().render_pdf(doc)
}

/// PDF renderer with minimal-layout fallback
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    fonts: Vec<Vec<u8>>,
}

impl PdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer that embeds the given font files
    pub fn with_font_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        Ok(Self {
            fonts: load_fonts(paths)?,
        })
    }

    /// Render, falling back to the minimal layout on failure
    pub fn render_pdf(&self, doc: &Document) -> Result<Vec<u8>> {
        render_with_fallback(doc, |markup| Compiler::compile_with_fonts(markup, &self.fonts))
    }
}

/// Compile the full layout, then the minimal layout if that fails
fn render_with_fallback<F>(doc: &Document, compile: F) -> Result<Vec<u8>>
where
    F: Fn(&str) -> Result<Vec<u8>>,
{
    let full = match compile(&Transpiler::transpile(doc)) {
        Ok(bytes) => return Ok(bytes),
        Err(e) => e,
    };
    log::warn!("PDF layout failed, retrying with minimal layout: {}", full);

    compile(&Transpiler::transpile_minimal(doc)).map_err(|minimal| PdfError::Fallback {
        full: Box::new(full),
        minimal: Box::new(minimal),
    })
}

impl Renderer for PdfRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn render(&self, doc: &Document) -> RenderResult<Vec<u8>> {
        self.render_pdf(doc)
            .map_err(|e| RenderError::backend(OutputFormat::Pdf, e))
    }
}
