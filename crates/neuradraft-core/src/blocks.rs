//! Section body classification
//!
//! Turns a raw section body into paragraphs and bulleted list items. All
//! renderers go through [`parse_body`], so the list-item rule is the same in
//! every output format.

use neuradraft_ast::{BodyBlock, Document};

use crate::normalize::normalize;

/// Bullet glyph accepted as a list marker without a following space
const BULLET_GLYPH: char = '\u{2022}';

/// Return the item text if `line` is a bulleted list item
///
/// A list item starts (after trimming) with the bullet glyph, or with `-`
/// or `*` followed by whitespace. `**bold**` at line start is not an item.
pub fn list_item_text(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix(BULLET_GLYPH) {
        return Some(rest.trim_start());
    }
    let mut chars = trimmed.chars();
    match (chars.next(), chars.next()) {
        (Some('-' | '*'), None) => Some(""),
        (Some('-' | '*'), Some(c)) if c.is_whitespace() => Some(trimmed[1..].trim_start()),
        _ => None,
    }
}

/// Horizontal rules like `---` or `* * *` carry no text
fn is_thematic_break(line: &str) -> bool {
    let marks: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
    marks.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|m| marks.iter().all(|c| c == m))
}

/// Classify and normalize each line of a raw section body
///
/// Lines that normalize to nothing are dropped.
pub fn parse_body(body: &str) -> Vec<BodyBlock> {
    let mut blocks = Vec::new();

    for line in body.lines() {
        if line.trim().is_empty() || is_thematic_break(line) {
            continue;
        }

        let block = match list_item_text(line) {
            Some(item) => BodyBlock::ListItem(normalize(item)),
            None => BodyBlock::Paragraph(normalize(line)),
        };

        if !block.text().is_empty() {
            blocks.push(block);
        }
    }

    blocks
}

/// Whole document body as normalized text, without section structure
///
/// Used by minimal fallback layouts.
pub fn plain_content(doc: &Document) -> String {
    normalize(&doc.body_text())
}
