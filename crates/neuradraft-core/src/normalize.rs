//! Text normalization
//!
//! Generated text arrives as markdown with typographic punctuation. Renderers
//! that emit their own structure need it as plain text, and the PDF target
//! additionally needs it restricted to an 8-bit character range.
//!
//! # Example
//!
//! ```
//! use neuradraft_core::normalize::{normalize, to_legacy_encoding};
//!
//! let text = normalize("## Caf\u{e9} \u{2014} **bold**");
//! assert_eq!(text, "Caf\u{e9} - bold");
//! assert_eq!(to_legacy_encoding(&text), "Caf? - bold");
//! ```

use std::sync::OnceLock;

use regex::Regex;

/// Character used for anything the legacy charset cannot represent
pub const REPLACEMENT_CHAR: char = '?';

/// Fixed punctuation table applied before markup stripping
const PUNCTUATION_TABLE: &[(char, &str)] = &[
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{2022}', "*"),
    ('\u{2026}', "..."),
    ('\u{00A0}', " "),
    ('\u{00B0}', " degrees "),
    ('\u{00AE}', "(R)"),
    ('\u{00A9}', "(C)"),
    ('\u{2122}', "(TM)"),
];

/// Target range for [`to_legacy_encoding_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegacyCharset {
    /// 7-bit US-ASCII
    #[default]
    Ascii,
    /// ISO-8859-1
    Latin1,
}

impl LegacyCharset {
    /// Check if a character is representable in this charset
    pub fn contains(self, c: char) -> bool {
        match self {
            LegacyCharset::Ascii => c.is_ascii(),
            LegacyCharset::Latin1 => (c as u32) <= 0xFF,
        }
    }
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*(?:#+[ \t]*)+").unwrap())
}

fn bold_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").unwrap())
}

fn italic_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*(.*?)\*").unwrap())
}

fn code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"`(.*?)`").unwrap())
}

fn link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[(.*?)\]\(.*?\)").unwrap())
}

fn blank_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n").unwrap())
}

/// Replace the fixed punctuation table with ASCII equivalents
///
/// Characters not in the table are left untouched.
pub fn replace_punctuation(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for c in text.chars() {
        match PUNCTUATION_TABLE.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => output.push_str(to),
            None => output.push(c),
        }
    }
    output
}

/// Strip inline markdown markup: bold, italic, inline code and links
///
/// Each pattern is applied once, non-greedy. Nested or unbalanced markup is
/// not guaranteed to resolve.
pub fn strip_inline_markup(text: &str) -> String {
    let text = bold_re().replace_all(text, "$1");
    let text = italic_re().replace_all(&text, "$1");
    let text = code_re().replace_all(&text, "$1");
    link_re().replace_all(&text, "$1").into_owned()
}

/// Normalize generated text into clean plain text
///
/// Applies, in order: the punctuation table, heading-prefix removal, inline
/// markup removal, blank-line collapsing and a final trim. Heading and markup
/// removal repeat until neither changes the text, so markup that hides a `#`
/// (as in `` `#include` ``) cannot leave a marker at a line start.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = text.replace("\r\n", "\n");
    let text = replace_punctuation(&text);
    let text = strip_markers_and_markup(text);
    let text = blank_run_re().replace_all(&text, "\n\n");

    text.trim().to_string()
}

/// Strip heading prefixes and inline markup to a fixed point
///
/// Terminates because every change removes characters.
fn strip_markers_and_markup(mut text: String) -> String {
    loop {
        let stripped = heading_re().replace_all(&text, "");
        let stripped = strip_inline_markup(&stripped);
        if stripped == text {
            return text;
        }
        text = stripped;
    }
}

/// Restrict text to the default legacy charset (US-ASCII)
pub fn to_legacy_encoding(text: &str) -> String {
    to_legacy_encoding_with(text, LegacyCharset::default())
}

/// Restrict text to `charset`, substituting [`REPLACEMENT_CHAR`]
///
/// Never fails. Newlines and tabs are always kept.
pub fn to_legacy_encoding_with(text: &str, charset: LegacyCharset) -> String {
    text.chars()
        .map(|c| {
            if charset.contains(c) {
                c
            } else {
                REPLACEMENT_CHAR
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\n  "), "");
    }

    #[test]
    fn test_punctuation_and_passthrough() {
        assert_eq!(
            normalize("Caf\u{e9} \u{2014} \u{2018}test\u{2019}"),
            "Caf\u{e9} - 'test'"
        );
    }

    #[test]
    fn test_full_punctuation_table() {
        let input = "a\u{2013}b \u{201C}q\u{201D} \u{2026} x\u{00A0}y 30\u{00B0} \u{00AE}\u{00A9}\u{2122}";
        assert_eq!(
            replace_punctuation(input),
            "a-b \"q\" ... x y 30 degrees  (R)(C)(TM)"
        );
    }

    #[test]
    fn test_bullet_glyph_becomes_asterisk() {
        assert_eq!(replace_punctuation("\u{2022} item"), "* item");
    }

    #[test]
    fn test_strip_headings() {
        assert_eq!(normalize("# Title\n## Sub\n###No space"), "Title\nSub\nNo space");
        assert_eq!(normalize("  ## Indented"), "Indented");
    }

    #[test]
    fn test_heading_marker_inside_line_kept() {
        assert_eq!(normalize("Issue #42 is fixed"), "Issue #42 is fixed");
    }

    #[test]
    fn test_strip_inline_markup() {
        assert_eq!(normalize("**bold** and *italic*"), "bold and italic");
        assert_eq!(normalize("run `cargo test` now"), "run cargo test now");
        assert_eq!(
            normalize("see [the docs](https://example.com) here"),
            "see the docs here"
        );
    }

    #[test]
    fn test_markup_does_not_span_lines() {
        assert_eq!(normalize("* one\n* two"), "* one\n* two");
    }

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(normalize("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\n  \n \t \nb"), "a\n\nb");
        assert_eq!(normalize("a\nb"), "a\nb");
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(normalize("## A\r\nbody\r\n\r\n\r\nmore"), "A\nbody\n\nmore");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "## Heading\n\nSome **bold** text with a [link](http://x.y).\n\n\n- item \u{2014} one\n- item two",
            "Caf\u{e9} \u{2014} \u{2018}test\u{2019}",
            "### Deep\n`code` and *em*\n\n\n\n\nend \u{2026}",
            "# # double marker",
            "plain",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_no_heading_markers_at_line_start() {
        let out = normalize("# a\n  ## b\n### c\ntext # not heading");
        for line in out.lines() {
            assert!(!line.trim_start().starts_with('#'), "line {:?}", line);
        }
    }

    #[test]
    fn test_marker_exposed_by_markup_is_removed() {
        let inputs = [
            "`#include` is a directive",
            "*#* tagged",
            "[#](http://x) hashtag",
            "**##** two levels",
        ];
        for input in inputs {
            let once = normalize(input);
            assert!(!once.starts_with('#'), "{:?} -> {:?}", input, once);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
        assert_eq!(normalize("`#include` is a directive"), "include is a directive");
    }

    #[test]
    fn test_legacy_encoding_substitutes() {
        let text = normalize("Caf\u{e9} \u{2014} \u{2018}test\u{2019}");
        assert_eq!(to_legacy_encoding(&text), "Caf? - 'test'");
    }

    #[test]
    fn test_legacy_encoding_latin1() {
        assert_eq!(
            to_legacy_encoding_with("Caf\u{e9} \u{4e2d}", LegacyCharset::Latin1),
            "Caf\u{e9} ?"
        );
    }

    #[test]
    fn test_legacy_encoding_keeps_layout() {
        assert_eq!(to_legacy_encoding("a\n\tb"), "a\n\tb");
        assert_eq!(to_legacy_encoding(""), "");
    }
}
