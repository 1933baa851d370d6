//! Typst to PDF compiler
//!
//! Compiles Typst markup to PDF bytes using typst-as-lib. The fonts bundled
//! with Typst are always available; caller fonts are added on top.

use std::path::Path;

use crate::error::{PdfError, Result};
use typst_as_lib::TypstEngine;

/// Compiler for converting Typst markup to PDF
pub struct Compiler;

impl Compiler {
    /// Compile Typst markup to PDF bytes
    pub fn compile(markup: &str) -> Result<Vec<u8>> {
        Self::compile_with_fonts(markup, &[])
    }

    /// Compile with font data loaded by the caller
    pub fn compile_with_fonts(markup: &str, fonts: &[Vec<u8>]) -> Result<Vec<u8>> {
        let fonts: Vec<&[u8]> = typst_assets::fonts()
            .map(|font| font as &[u8])
            .chain(fonts.iter().map(Vec::as_slice))
            .collect();
        let engine = TypstEngine::builder()
            .main_file(markup.to_string())
            .fonts(fonts)
            .build();

        // compiled is Warned<Result<Document, Error>>
        let compiled = engine.compile();
        if !compiled.warnings.is_empty() {
            log::debug!("Typst reported {} warning(s)", compiled.warnings.len());
        }
        let document = compiled
            .output
            .map_err(|e| PdfError::Compilation(format!("{:?}", e)))?;

        let options = typst_pdf::PdfOptions::default();
        let pdf_bytes = typst_pdf::pdf(&document, &options)
            .map_err(|e| PdfError::Export(format!("{:?}", e)))?;

        Ok(pdf_bytes.into())
    }
}

/// Read font files from disk
pub fn load_fonts<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Vec<u8>>> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            std::fs::read(path).map_err(|e| {
                PdfError::Font(format!("Failed to read font {}: {}", path.display(), e))
            })
        })
        .collect()
}

/// Check if a PDF declares at least one font resource
#[cfg(test)]
pub(crate) fn has_font_resource(pdf: &[u8]) -> bool {
    pdf.windows(5).any(|w| w == b"/Font")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_simple() {
        let markup = "= Hello World\n\nThis is a test document.";
        let result = Compiler::compile(markup);
        assert!(result.is_ok(), "Compilation failed: {:?}", result.err());

        let pdf = result.unwrap();
        assert!(pdf.starts_with(b"%PDF"), "Output doesn't start with PDF header");
    }

    #[test]
    fn test_text_has_embedded_font() {
        let pdf = Compiler::compile("Hello world").unwrap();
        assert!(has_font_resource(&pdf), "PDF text has no font resource");
    }

    #[test]
    fn test_invalid_caller_font_keeps_bundled_fonts() {
        let pdf = Compiler::compile_with_fonts("Hello world", &[b"not a font".to_vec()]).unwrap();
        assert!(has_font_resource(&pdf));
    }

    #[test]
    fn test_has_font_resource() {
        assert!(has_font_resource(b"<< /Type /Font >>"));
        assert!(!has_font_resource(b"%PDF-1.7"));
    }

    #[test]
    fn test_compile_headings_and_list() {
        let markup = "== Section One\n\nSome text.\n\n- Item one\n- Item two\n\n=== Detail\n\nMore.\n";
        let result = Compiler::compile(markup);
        assert!(result.is_ok(), "Compilation failed: {:?}", result.err());
    }

    #[test]
    fn test_compile_error_is_reported() {
        let result = Compiler::compile("#undefined_function_xyz()");
        assert!(matches!(result, Err(PdfError::Compilation(_))));
    }

    #[test]
    fn test_missing_font_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ttf");
        let result = load_fonts(&[missing]);
        assert!(matches!(result, Err(PdfError::Font(_))));
    }

    #[test]
    fn test_load_fonts_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.ttf");
        std::fs::write(&path, b"fake").unwrap();
        let fonts = load_fonts(&[path]).unwrap();
        assert_eq!(fonts, vec![b"fake".to_vec()]);
    }
}
