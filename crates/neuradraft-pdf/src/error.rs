//! Error types for PDF generation

use thiserror::Error;

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Errors that can occur during PDF generation
#[derive(Error, Debug)]
pub enum PdfError {
    /// Typst compilation error
    #[error("Typst compilation failed: {0}")]
    Compilation(String),

    /// Typst compiled but PDF export failed
    #[error("PDF export failed: {0}")]
    Export(String),

    /// Font loading error
    #[error("Font error: {0}")]
    Font(String),

    /// Both the full and the minimal layout failed
    #[error("PDF generation failed: {full}; minimal layout also failed: {minimal}")]
    Fallback { full: Box<PdfError>, minimal: Box<PdfError> },
}
