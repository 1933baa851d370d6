//! Renderer abstraction
//!
//! Every output format implements [`Renderer`]. Renderers read the shared,
//! immutable [`Document`] and return the encoded bytes; [`dispatch`] runs
//! them independently so one failing format never blocks the others.
//!
//! The plain text and HTML renderers live here. PDF and DOCX are provided by
//! the `neuradraft-pdf` and `neuradraft-ooxml` crates.

use std::fmt;

use neuradraft_ast::{Document, OutputFormat};

pub mod dispatch;
pub mod html;
pub mod text;

pub use dispatch::{render_all, stage_artifacts, Artifact, Delivery, RenderOutcome};
pub use html::HtmlRenderer;
pub use text::PlainTextRenderer;

/// Errors that can occur while rendering a document
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The backend library reported a failure
    #[error("{format} rendering failed: {message}")]
    Backend {
        format: OutputFormat,
        message: String,
    },

    /// The renderer panicked (caught by the dispatcher)
    #[error("{format} renderer panicked: {message}")]
    Panic {
        format: OutputFormat,
        message: String,
    },

    /// I/O error while staging an artifact
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Wrap a backend error for `format`
    pub fn backend(format: OutputFormat, err: impl fmt::Display) -> Self {
        RenderError::Backend {
            format,
            message: err.to_string(),
        }
    }
}

/// Result type for renderer operations
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// An output format renderer
///
/// Renderers must be `Send + Sync`; they hold configuration only and can be
/// shared across threads.
pub trait Renderer: Send + Sync {
    /// Format produced by this renderer
    fn format(&self) -> OutputFormat;

    /// Render the document to bytes
    fn render(&self, doc: &Document) -> RenderResult<Vec<u8>>;
}
