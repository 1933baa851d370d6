//! Artifact naming
//!
//! Rendered files are named
//! `{doctype}_{topic_with_underscores}_{YYYYMMDD_HHMMSS}.{ext}`.

use chrono::NaiveDateTime;
use neuradraft_ast::{DocType, OutputFormat};

/// Timestamp layout used in file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Keep only letters, digits, underscore, hyphen and space
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ' '))
        .collect()
}

/// Build the sanitized base name shared by all formats of one document
pub fn base_file_name(doc_type: DocType, topic: &str, timestamp: NaiveDateTime) -> String {
    let raw = format!(
        "{}_{}_{}",
        doc_type.display_name().to_lowercase(),
        topic.replace(' ', "_"),
        timestamp.format(TIMESTAMP_FORMAT)
    );
    sanitize_file_name(&raw)
}

/// Append the format's extension to a base name
pub fn artifact_file_name(base: &str, format: OutputFormat) -> String {
    format!("{}.{}", base, format.extension())
}

/// Title shown at the top of every rendered document
pub fn document_title(doc_type: DocType, topic: &str) -> String {
    format!("{}: {}", doc_type, topic.trim())
}
