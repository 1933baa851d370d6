//! Document root and section definitions
//!
//! A [`Document`] is created once per generation cycle from the model's
//! markdown output and is never mutated afterwards. Renderers only read it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Heading used for content that appears before the first section marker
pub const DEFAULT_HEADING: &str = "Introduction";

/// A complete generated document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document title (e.g. "Report: Renewable Energy")
    pub title: String,
    /// Sections in source order
    pub sections: Vec<Section>,
}

impl Document {
    /// Create a document from a title and its sections
    pub fn new(title: impl Into<String>, sections: Vec<Section>) -> Self {
        Self {
            title: title.into(),
            sections,
        }
    }

    /// Check if the document has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Get the number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Concatenate all raw section bodies in order, ignoring headings
    pub fn body_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.body.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Depth of a section heading
///
/// Only `##` and `###` markers open sections. The level is kept from the
/// marker so renderers never have to guess hierarchy from the heading text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// `## ` marker, a top-level section
    #[default]
    H2,
    /// `### ` marker, a sub-section
    H3,
}

impl HeadingLevel {
    /// Markdown marker for this level, without the trailing space
    pub fn marker(self) -> &'static str {
        match self {
            HeadingLevel::H2 => "##",
            HeadingLevel::H3 => "###",
        }
    }
}

/// A titled span of body text bounded by heading markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text without the marker
    pub heading: String,
    /// Heading depth taken from the marker
    pub level: HeadingLevel,
    /// Raw body lines joined with `\n`, not yet normalized
    pub body: String,
}

impl Section {
    /// Create a section
    pub fn new(heading: impl Into<String>, level: HeadingLevel, body: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            level,
            body: body.into(),
        }
    }

    /// Create a section under the default "Introduction" heading
    pub fn introduction(body: impl Into<String>) -> Self {
        Self::new(DEFAULT_HEADING, HeadingLevel::H2, body)
    }
}

/// Kind of document the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DocType {
    #[default]
    Article,
    Report,
    ResearchPaper,
    Guide,
}

impl DocType {
    /// All document types in menu order
    pub fn all() -> &'static [DocType] {
        &[
            DocType::Article,
            DocType::Report,
            DocType::ResearchPaper,
            DocType::Guide,
        ]
    }

    /// Human-readable name
    pub fn display_name(self) -> &'static str {
        match self {
            DocType::Article => "Article",
            DocType::Report => "Report",
            DocType::ResearchPaper => "Research Paper",
            DocType::Guide => "Guide",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "article" => Ok(DocType::Article),
            "report" => Ok(DocType::Report),
            "researchpaper" | "paper" => Ok(DocType::ResearchPaper),
            "guide" => Ok(DocType::Guide),
            _ => Err(format!("unknown document type: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let doc = Document::default();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
        assert_eq!(doc.body_text(), "");
    }

    #[test]
    fn test_body_text_ignores_headings() {
        let doc = Document::new(
            "Guide: Rust",
            vec![
                Section::introduction("first"),
                Section::new("Setup", HeadingLevel::H3, "second\nthird"),
            ],
        );
        assert_eq!(doc.body_text(), "first\nsecond\nthird");
    }

    #[test]
    fn test_introduction_section() {
        let section = Section::introduction("body");
        assert_eq!(section.heading, DEFAULT_HEADING);
        assert_eq!(section.level, HeadingLevel::H2);
    }

    #[test]
    fn test_heading_level_markers() {
        assert_eq!(HeadingLevel::H2.marker(), "##");
        assert_eq!(HeadingLevel::H3.marker(), "###");
    }

    #[test]
    fn test_doc_type_parse() {
        assert_eq!("Research Paper".parse(), Ok(DocType::ResearchPaper));
        assert_eq!("research-paper".parse(), Ok(DocType::ResearchPaper));
        assert_eq!("GUIDE".parse(), Ok(DocType::Guide));
        assert!("memo".parse::<DocType>().is_err());
    }

    #[test]
    fn test_doc_type_display() {
        assert_eq!(DocType::ResearchPaper.to_string(), "Research Paper");
        assert_eq!(DocType::all().len(), 4);
    }

    #[test]
    fn test_document_serde() {
        let doc = Document::new("T", vec![Section::introduction("x")]);
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"heading\":\"Introduction\""));
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }
}
