//! Doc comment assembler.
//!
//! Drives the scanner, markup tokenizer, sentence splitter, and block tag
//! parser over decoration-stripped comment content and assembles the final
//! [`DocComment`] tree. All malformed markup is recovered in-tree; the only
//! hard failure is an HTML comment left open at end of content.

use std::borrow::Cow;

use crate::error::ParseError;
use crate::html;
use crate::scan::Scanner;
use crate::sentence;
use crate::span::Span;
use crate::tree::{BlockTag, CowStr, DocComment, DocNode, Markup, RawText, TagKind, Text};

/// Doc comment parser, parameterized by markup flavor.
///
/// The flavor is immutable for the lifetime of one parse: in `Html` mode the
/// tokenizer interprets `<` as markup, in `Markdown` mode all punctuation is
/// literal and content regions become `RawText` nodes. Parses are
/// independent; the parser holds no state across calls, so comments may be
/// parsed in parallel with one parser per thread or a shared reference.
pub struct DocParser {
    markup: Markup,
    /// Source offset of the content's first byte, added to every span.
    base: u32,
}

impl DocParser {
    /// Create a parser for the given markup flavor.
    #[inline]
    pub fn new(markup: Markup) -> Self {
        Self { markup, base: 0 }
    }

    /// Report node offsets in source-file coordinates by adding `base` (the
    /// source offset of the content's first byte) to every span.
    pub fn with_base_offset(mut self, base: u32) -> Self {
        self.base = base;
        self
    }

    /// Parse decoration-stripped comment content into a [`DocComment`].
    ///
    /// Returns `Err` only for an unterminated HTML comment; every other
    /// malformed-markup situation is recovered in-tree as an `Erroneous`
    /// node.
    pub fn parse<'a>(&self, content: &'a str) -> Result<DocComment<'a>, ParseError> {
        let mut sc = Scanner::new(content);

        let nodes = self.content(&mut sc)?;
        let (first_sentence, body) = sentence::split_first_sentence(nodes);
        let block_tags = self.block_tags(&mut sc)?;

        Ok(DocComment {
            markup: self.markup,
            first_sentence,
            body,
            block_tags,
            span: Span::new(0, content.len() as u32).shifted(self.base),
        })
    }

    /// Parse nodes until end of content or a block-tag introducer line,
    /// leaving the scanner at the `@`.
    fn content<'a>(&self, sc: &mut Scanner<'a>) -> Result<Vec<DocNode<'a>>, ParseError> {
        let mut nodes = Vec::new();
        let mut text_start = sc.pos();

        loop {
            match self.markup {
                Markup::Html => sc.seek_markup(),
                Markup::Markdown => sc.seek_at_sign(),
            }
            match sc.peek() {
                None => {
                    self.flush_text(sc, &mut nodes, text_start, sc.pos(), true);
                    return Ok(nodes);
                }
                Some(b'@') => {
                    if is_introducer(sc) {
                        self.flush_text(sc, &mut nodes, text_start, sc.pos(), true);
                        return Ok(nodes);
                    }
                    sc.bump(1);
                }
                Some(b'<') => {
                    self.flush_text(sc, &mut nodes, text_start, sc.pos(), false);
                    nodes.push(html::markup(sc, self.base)?);
                    text_start = sc.pos();
                }
                Some(_) => sc.bump(1),
            }
        }
    }

    /// Emit the pending text run as a node, if it is non-empty.
    ///
    /// The run before a block-tag introducer or end of content is trimmed of
    /// trailing whitespace; a run before a markup construct is kept verbatim.
    fn flush_text<'a>(
        &self,
        sc: &Scanner<'a>,
        nodes: &mut Vec<DocNode<'a>>,
        start: usize,
        end: usize,
        trim_trailing: bool,
    ) {
        let mut text = sc.slice(start, end);
        if trim_trailing {
            text = text.trim_end_matches(|c: char| c.is_ascii_whitespace());
        }
        if text.is_empty() {
            return;
        }
        let span = Span::new(start as u32, (start + text.len()) as u32).shifted(self.base);
        let content: CowStr<'a> = Cow::Borrowed(text);
        nodes.push(match self.markup {
            Markup::Html => DocNode::Text(Text { content, span }),
            Markup::Markdown => DocNode::RawText(RawText { content, span }),
        });
    }

    /// Parse the trailing block-tag region. The scanner must be at the
    /// first introducer or at end of content.
    fn block_tags<'a>(&self, sc: &mut Scanner<'a>) -> Result<Vec<BlockTag<'a>>, ParseError> {
        let mut tags = Vec::new();

        while !sc.is_eof() {
            debug_assert_eq!(sc.peek(), Some(b'@'));
            let at = sc.pos();
            sc.bump(1);
            let name = read_tag_name(sc);
            sc.skip_whitespace();
            let content = self.content(sc)?;

            let start = at as u32 + self.base;
            let end = match content.last() {
                Some(last) => last.span().end,
                None => start + 1 + name.len() as u32,
            };
            tags.push(BlockTag {
                kind: TagKind::from_name(&name),
                name,
                content,
                span: Span::new(start, end),
            });
        }

        Ok(tags)
    }
}

/// An `@` introduces a block tag when nothing but whitespace precedes it on
/// its line and a tag name follows.
fn is_introducer(sc: &Scanner<'_>) -> bool {
    matches!(sc.peek_at(1), Some(b) if b.is_ascii_alphabetic()) && sc.at_line_start()
}

/// Tag name: greedy run of letters, digits, `.`, `_`, `-` after the `@`.
fn read_tag_name<'a>(sc: &mut Scanner<'a>) -> CowStr<'a> {
    let start = sc.pos();
    while let Some(b) = sc.peek() {
        if b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-') {
            sc.bump(1);
        } else {
            break;
        }
    }
    Cow::Borrowed(sc.slice(start, sc.pos()))
}
