//! Section splitter
//!
//! Partitions flat markdown into ordered `(heading, body)` sections using
//! `## ` and `### ` lines as boundaries. Everything else, including `#` and
//! `####` headings, is body content.
//!
//! # Example
//!
//! ```
//! use neuradraft_core::split_into_sections;
//!
//! let sections = split_into_sections("## A\nfoo\n## B\nbar");
//! assert_eq!(sections.len(), 2);
//! assert_eq!(sections[0].heading, "A");
//! assert_eq!(sections[1].body, "bar");
//! ```

use neuradraft_ast::{HeadingLevel, Section, DEFAULT_HEADING};

/// Splitter state: the heading waiting for content and the body collected so far
struct Splitter {
    /// Finished sections
    sections: Vec<Section>,
    /// Heading of the section being built
    heading: String,
    /// Level of the section being built
    level: HeadingLevel,
    /// Non-blank body lines of the section being built
    lines: Vec<String>,
}

impl Splitter {
    fn new() -> Self {
        Self {
            sections: Vec::new(),
            heading: DEFAULT_HEADING.to_string(),
            level: HeadingLevel::H2,
            lines: Vec::new(),
        }
    }

    fn split(mut self, text: &str) -> Vec<Section> {
        for line in text.lines() {
            self.process_line(line);
        }
        self.flush();
        self.sections
    }

    fn process_line(&mut self, line: &str) {
        if let Some((level, heading)) = parse_heading(line) {
            self.flush();
            self.heading = heading;
            self.level = level;
        } else if !line.trim().is_empty() {
            self.lines.push(line.to_string());
        }
    }

    /// Close the current section; a heading with no body is dropped
    fn flush(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        let body = self.lines.join("\n");
        self.lines.clear();
        self.sections
            .push(Section::new(self.heading.clone(), self.level, body));
    }
}

/// Recognize a section boundary line and return its level and text
///
/// The marker is checked on the trimmed line, so `"  ## Title"` counts.
pub fn parse_heading(line: &str) -> Option<(HeadingLevel, String)> {
    let trimmed = line.trim();
    // "###" also starts with "##"
    [HeadingLevel::H3, HeadingLevel::H2]
        .into_iter()
        .find_map(|level| {
            trimmed
                .strip_prefix(level.marker())
                .and_then(|rest| rest.strip_prefix(' '))
                .map(|rest| (level, rest.trim().to_string()))
        })
}

/// Split markdown text into ordered sections
///
/// - Empty input yields no sections.
/// - Content before the first heading goes under "Introduction".
/// - Blank lines are dropped; body lines are kept verbatim.
pub fn split_into_sections(text: &str) -> Vec<Section> {
    if text.is_empty() {
        return Vec::new();
    }
    Splitter::new().split(text)
}
