//! Document to Typst markup transpiler
//!
//! All text is normalized, reduced to the legacy character set and escaped
//! before it reaches Typst, so model output can never inject markup.

use neuradraft_ast::{BodyBlock, Document, HeadingLevel};
use neuradraft_core::blocks::{parse_body, plain_content};
use neuradraft_core::{normalize, to_legacy_encoding};

/// Page setup shared by both layouts
const PREAMBLE: &str = "#set page(paper: \"a4\", margin: 2cm)\n#set text(size: 11pt)\n#set par(justify: true)\n";

/// Transpiler for converting a document to Typst markup
pub struct Transpiler;

impl Transpiler {
    /// Transpile a document to the full structured layout
    pub fn transpile(doc: &Document) -> String {
        let title = to_legacy_encoding(&normalize(&doc.title));
        let mut output = Self::header(&title);

        for section in &doc.sections {
            let prefix = match section.level {
                HeadingLevel::H2 => "==",
                HeadingLevel::H3 => "===",
            };
            let heading = to_legacy_encoding(&normalize(&section.heading));
            output.push_str(&format!("\n{} {}\n\n", prefix, escape_markup(&heading)));

            let mut in_list = false;
            for block in parse_body(&section.body) {
                let text = escape_markup(&to_legacy_encoding(block.text()));
                match block {
                    BodyBlock::ListItem(_) => {
                        output.push_str(&format!("- {}\n", text));
                        in_list = true;
                    }
                    BodyBlock::Paragraph(_) => {
                        if in_list {
                            output.push('\n');
                            in_list = false;
                        }
                        output.push_str(&format!("{}\n\n", text));
                    }
                }
            }
        }

        output
    }

    /// Transpile to the minimal layout: title and one block of text
    pub fn transpile_minimal(doc: &Document) -> String {
        let title = to_legacy_encoding(&normalize(&doc.title));
        let content = to_legacy_encoding(&plain_content(doc));
        let mut output = Self::header(&title);
        output.push_str(&format!("\n#text(\"{}\")\n", escape_string(&content)));
        output
    }

    fn header(title: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("#set document(title: \"{}\")\n", escape_string(title)));
        output.push_str(PREAMBLE);
        output.push_str(&format!(
            "#align(center, text(size: 18pt, weight: \"bold\", \"{}\"))\n",
            escape_string(title)
        ));
        output
    }
}

/// Escape text for use inside a Typst string literal
fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Characters with meaning in Typst markup
const MARKUP_CHARS: &[char] = &[
    '\\', '#', '*', '_', '$', '@', '<', '>', '[', ']', '`', '~', '=', '-', '+', '/', '"',
];

/// Escape text for use as Typst markup content
fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 8);
    let mut leading_digits = true;
    for c in s.chars() {
        if MARKUP_CHARS.contains(&c) {
            out.push('\\');
        } else if c == '.' && leading_digits && !out.is_empty() {
            // "1." at the start would become an enumeration
            out.push('\\');
        }
        leading_digits = leading_digits && c.is_ascii_digit();
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuradraft_ast::Section;

    fn sample() -> Document {
        Document::new(
            "Report: Caf\u{e9} Culture",
            vec![
                Section::introduction("Coffee is **popular** \u{2014} very."),
                Section::new("Origins", HeadingLevel::H2, "- Ethiopia\n- Yemen\nSpread worldwide."),
                Section::new("Roasting", HeadingLevel::H3, "Costs $5 #1 <b>"),
            ],
        )
    }

    #[test]
    fn test_title_and_headings() {
        let markup = Transpiler::transpile(&sample());
        assert!(markup.starts_with("#set document(title: \"Report: Caf? Culture\")\n"));
        assert!(markup.contains("\n== Introduction\n"));
        assert!(markup.contains("\n== Origins\n"));
        assert!(markup.contains("\n=== Roasting\n"));
    }

    #[test]
    fn test_legacy_text() {
        let markup = Transpiler::transpile(&sample());
        assert!(!markup.contains('\u{e9}'));
        assert!(markup.contains("Coffee is popular \\- very."));
    }

    #[test]
    fn test_list_items() {
        let markup = Transpiler::transpile(&sample());
        assert!(markup.contains("- Ethiopia\n- Yemen\n\nSpread worldwide.\n"));
    }

    #[test]
    fn test_markup_is_escaped() {
        let markup = Transpiler::transpile(&sample());
        assert!(markup.contains("Costs \\$5 \\#1 \\<b\\>"));
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_markup("a_b*c"), "a\\_b\\*c");
        assert_eq!(escape_markup("1. first"), "1\\. first");
        assert_eq!(escape_markup("v1.2"), "v1.2");
        assert_eq!(escape_markup("// not a comment"), "\\/\\/ not a comment");
        assert_eq!(escape_markup("= not a heading"), "\\= not a heading");
    }

    #[test]
    fn test_escape_string() {
        assert_eq!(escape_string("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_string("a\\b"), "a\\\\b");
        assert_eq!(escape_string("one\ntwo"), "one\\ntwo");
    }

    #[test]
    fn test_minimal_layout() {
        let markup = Transpiler::transpile_minimal(&sample());
        assert!(markup.contains("#set document(title: \"Report: Caf? Culture\")"));
        assert!(markup.contains("#text(\"Coffee is popular - very.\\n"));
        assert!(!markup.contains("=="));
    }
}
