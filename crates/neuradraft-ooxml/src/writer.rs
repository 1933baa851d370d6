//! DOCX Writer
//!
//! Writes a `neuradraft_ast::Document` as a WordprocessingML package, either
//! self-contained or on top of a template.
//!
//! # Example
//!
//! ```ignore
//! use neuradraft_ooxml::{DocxWriter, Template};
//!
//! let plain = DocxWriter::generate(&doc)?;
//! let branded = DocxWriter::generate_with_template(&doc, Template::load("corp.dotx")?)?;
//! std::fs::write("output.docx", branded)?;
//! ```

use neuradraft_ast::{BodyBlock, Document, HeadingLevel};
use neuradraft_core::{normalize, parse_body};
use quick_xml::escape::escape;

use crate::error::Result;
use crate::package::{
    default_package, DOCUMENT_PATH, HEADING1_STYLE, HEADING2_STYLE, LIST_BULLET_STYLE,
    NORMAL_STYLE, TITLE_STYLE,
};
use crate::template::Template;

/// A4 portrait with 2.5cm margins, in twentieths of a point
const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/><w:pgMar w:top="1417" w:right="1417" w:bottom="1417" w:left="1417" w:header="708" w:footer="708" w:gutter="0"/></w:sectPr>"#;

/// DOCX Writer for generating DOCX files from a document
pub struct DocxWriter {
    /// XML output buffer
    output: String,
    /// Numbering instance used for bullet items
    bullet_num_id: u32,
}

impl Default for DocxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxWriter {
    /// Create a new DocxWriter
    pub fn new() -> Self {
        Self {
            output: String::new(),
            bullet_num_id: 1,
        }
    }

    /// Generate a self-contained DOCX file
    pub fn generate(doc: &Document) -> Result<Vec<u8>> {
        let title = normalize(&doc.title);
        let mut archive = default_package(&title);
        let mut writer = Self::new();
        archive.set_string(DOCUMENT_PATH, writer.generate_document_xml(doc));
        archive.to_bytes()
    }

    /// Generate a DOCX file that inherits styles and page setup from a template
    pub fn generate_with_template(doc: &Document, template: Template) -> Result<Vec<u8>> {
        let title = normalize(&doc.title);
        let (mut archive, bullet_num_id) = template.prepare(&title)?;
        let mut writer = Self {
            output: String::new(),
            bullet_num_id,
        };
        archive.set_string(DOCUMENT_PATH, writer.generate_document_xml(doc));
        archive.to_bytes()
    }

    /// Generate the complete document.xml content
    fn generate_document_xml(&mut self, doc: &Document) -> String {
        self.output.clear();

        self.output
            .push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        self.output.push('\n');
        self.output.push_str(
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
        );
        self.output.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );
        self.output.push('\n');
        self.output.push_str("<w:body>\n");

        self.generate_paragraph(TITLE_STYLE, &normalize(&doc.title));

        for section in &doc.sections {
            let style = match section.level {
                HeadingLevel::H2 => HEADING1_STYLE,
                HeadingLevel::H3 => HEADING2_STYLE,
            };
            self.generate_paragraph(style, &normalize(&section.heading));

            for block in parse_body(&section.body) {
                match block {
                    BodyBlock::Paragraph(text) => self.generate_paragraph(NORMAL_STYLE, &text),
                    BodyBlock::ListItem(text) => self.generate_list_item(&text),
                }
            }
        }

        self.output.push_str(SECTION_PROPERTIES);
        self.output.push('\n');
        self.output.push_str("</w:body>\n");
        self.output.push_str("</w:document>");

        std::mem::take(&mut self.output)
    }

    fn generate_paragraph(&mut self, style: &str, text: &str) {
        self.output.push_str("<w:p>");
        self.output
            .push_str(&format!("<w:pPr><w:pStyle w:val=\"{}\"/></w:pPr>", style));
        self.generate_run(text);
        self.output.push_str("</w:p>\n");
    }

    /// Each list item is a paragraph with numbering properties
    fn generate_list_item(&mut self, text: &str) {
        self.output.push_str("<w:p><w:pPr>");
        self.output
            .push_str(&format!("<w:pStyle w:val=\"{}\"/>", LIST_BULLET_STYLE));
        self.output.push_str(&format!(
            "<w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"{}\"/></w:numPr>",
            self.bullet_num_id
        ));
        self.output.push_str("</w:pPr>");
        self.generate_run(text);
        self.output.push_str("</w:p>\n");
    }

    fn generate_run(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.output.push_str(&format!(
            "<w:r><w:t xml:space=\"preserve\">{}</w:t></w:r>",
            escape(text)
        ));
    }
}
