//! Comment-decoration stripping and markup flavor detection.
//!
//! The parser operates on comment *content*: the text left after removing
//! the comment delimiters and per-line decoration. This module performs
//! that removal and detects the markup flavor from the comment form:
//! `/** ... */` block comments parse as HTML, runs of `///` lines parse as
//! Markdown.

use crate::tree::Markup;

/// Decoration-stripped comment content plus its detected flavor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedComment {
    /// The content text; node offsets count bytes of this string.
    pub content: String,
    /// Flavor implied by the comment form.
    pub markup: Markup,
}

/// Strip comment decoration from a raw doc comment.
///
/// Returns `None` when `raw` is neither a `/** ... */` block comment nor a
/// run of `///` line comments.
///
/// # Example
///
/// ```rust
/// use doctree_core::{strip, Markup};
///
/// let s = strip("/**\n * abc <hr/>\n */").unwrap();
/// assert_eq!(s.content, "abc <hr/>");
/// assert_eq!(s.markup, Markup::Html);
/// ```
pub fn strip(raw: &str) -> Option<StrippedComment> {
    let trimmed = raw.trim();
    if let Some(inner) = trimmed
        .strip_prefix("/**")
        .and_then(|s| s.strip_suffix("*/"))
    {
        return Some(StrippedComment {
            content: strip_block(inner),
            markup: Markup::Html,
        });
    }
    if trimmed.starts_with("///") {
        return strip_lines(trimmed).map(|content| StrippedComment {
            content,
            markup: Markup::Markdown,
        });
    }
    None
}

/// Remove per-line `*` decoration from the inside of a block comment.
fn strip_block(inner: &str) -> String {
    let mut lines: Vec<&str> = inner.lines().map(strip_block_line).collect();
    trim_blank_lines(&mut lines);
    lines.join("\n")
}

fn strip_block_line(line: &str) -> &str {
    let line = line.trim_start_matches([' ', '\t']);
    let stripped = line.trim_start_matches('*');
    if stripped.len() == line.len() {
        // No decoration on this line.
        return line;
    }
    stripped.strip_prefix(' ').unwrap_or(stripped)
}

/// Remove the `///` marker from every line of a line-comment run.
fn strip_lines(raw: &str) -> Option<String> {
    let mut lines = Vec::new();
    for line in raw.lines() {
        let line = line.trim_start_matches([' ', '\t']);
        let line = line.strip_prefix("///")?;
        lines.push(line.strip_prefix(' ').unwrap_or(line));
    }
    trim_blank_lines(&mut lines);
    Some(lines.join("\n"))
}

fn trim_blank_lines(lines: &mut Vec<&str>) {
    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
}
