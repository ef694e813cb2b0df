//! Line-oriented markup → [`ContentBlock`] translation.
//!
//! The model is asked for a small markdown dialect but nothing guarantees it
//! complies, so the translator is total: every non-blank line becomes exactly
//! one block and nothing is ever rejected.
//!
//! | Prefix  | Block            |
//! |---------|------------------|
//! | `#### ` | section heading  |
//! | `### `  | section heading  |
//! | `## `   | top heading      |
//! | `- `    | bulleted item    |
//! | other   | paragraph (full line) |
//!
//! Rules are tried top to bottom; the first matching prefix wins.

use crate::models::ContentBlock;

/// One classification rule: a line prefix and the block it produces.
pub struct LineRule {
    pub prefix: &'static str,
    pub build: fn(String) -> ContentBlock,
}

/// Ordered rule table. Longer heading prefixes come first so `### ` is not
/// read as `## ` followed by `#`.
pub const LINE_RULES: &[LineRule] = &[
    LineRule {
        prefix: "#### ",
        build: ContentBlock::SectionHeading,
    },
    LineRule {
        prefix: "### ",
        build: ContentBlock::SectionHeading,
    },
    LineRule {
        prefix: "## ",
        build: ContentBlock::TopHeading,
    },
    LineRule {
        prefix: "- ",
        build: ContentBlock::BulletedItem,
    },
];

/// Classify a single non-blank line.
pub fn classify_line(line: &str) -> ContentBlock {
    LINE_RULES
        .iter()
        .find_map(|rule| line.strip_prefix(rule.prefix).map(|rest| (rule.build)(rest.to_string())))
        .unwrap_or_else(|| ContentBlock::Paragraph(line.to_string()))
}

/// Translate a whole document, dropping blank and whitespace-only lines.
pub fn translate(content: &str) -> Vec<ContentBlock> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(classify_line)
        .collect()
}
