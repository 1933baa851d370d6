//! Output format definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four formats a document is rendered into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Portable document
    Pdf,
    /// Word-processor document
    Docx,
    /// Plain text
    Txt,
    /// Web page
    Html,
}

impl OutputFormat {
    /// All formats in delivery order
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Pdf,
            OutputFormat::Docx,
            OutputFormat::Txt,
            OutputFormat::Html,
        ]
    }

    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
            OutputFormat::Txt => "txt",
            OutputFormat::Html => "html",
        }
    }

    /// Short name used in reports
    pub fn display_name(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "PDF",
            OutputFormat::Docx => "DOCX",
            OutputFormat::Txt => "TXT",
            OutputFormat::Html => "HTML",
        }
    }

    /// MIME type of the rendered bytes
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            OutputFormat::Txt => "text/plain",
            OutputFormat::Html => "text/html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "docx" | "word" => Ok(OutputFormat::Docx),
            "txt" | "text" => Ok(OutputFormat::Txt),
            "html" | "htm" => Ok(OutputFormat::Html),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}
