//! neuradraft-ast - Document model definitions
//!
//! This crate provides the types shared between the section splitter and
//! the four output renderers: the immutable [`Document`], its ordered
//! [`Section`]s, and the small enumerations describing document kinds and
//! output formats.

pub mod block;
pub mod document;
pub mod format;

pub use block::BodyBlock;
pub use document::{DocType, Document, HeadingLevel, Section, DEFAULT_HEADING};
pub use format::OutputFormat;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "0.1.0");
    }
}
