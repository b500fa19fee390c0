//! Sentence splitter: partition the body node stream into the summary
//! sentence and the remaining body.
//!
//! The first sentence ends at the first `.` followed by whitespace (or by a
//! tag boundary, or end of comment), or before a paragraph-level element
//! (`p`, `pre`, `h1`-`h6`). Terminators inside element names or attributes
//! never qualify because elements arrive here as whole nodes.

use std::borrow::Cow;

use crate::scan::is_whitespace;
use crate::span::Span;
use crate::tree::{CowStr, DocNode, RawText, Text};

/// Split a node sequence into (first sentence, body).
pub(crate) fn split_first_sentence<'a>(
    nodes: Vec<DocNode<'a>>,
) -> (Vec<DocNode<'a>>, Vec<DocNode<'a>>) {
    let mut fs: Vec<DocNode<'a>> = Vec::new();
    let mut iter = nodes.into_iter().peekable();

    while let Some(node) = iter.next() {
        match node {
            DocNode::Text(t) => {
                let has_next = iter.peek().is_some();
                match break_text(t.content, t.span, has_next) {
                    TextBreak::None(content, span) => {
                        fs.push(DocNode::Text(Text { content, span }));
                    }
                    TextBreak::Split { head, tail } => {
                        fs.push(DocNode::Text(Text {
                            content: head.0,
                            span: head.1,
                        }));
                        let mut body: Vec<DocNode<'a>> = Vec::new();
                        if let Some((content, span)) = tail {
                            body.push(DocNode::Text(Text { content, span }));
                        }
                        body.extend(iter);
                        return (fs, body);
                    }
                }
            }
            DocNode::RawText(r) => {
                let has_next = iter.peek().is_some();
                match break_text(r.content, r.span, has_next) {
                    TextBreak::None(content, span) => {
                        fs.push(DocNode::RawText(RawText { content, span }));
                    }
                    TextBreak::Split { head, tail } => {
                        fs.push(DocNode::RawText(RawText {
                            content: head.0,
                            span: head.1,
                        }));
                        let mut body: Vec<DocNode<'a>> = Vec::new();
                        if let Some((content, span)) = tail {
                            body.push(DocNode::RawText(RawText { content, span }));
                        }
                        body.extend(iter);
                        return (fs, body);
                    }
                }
            }
            node => {
                if is_sentence_break(&node, fs.is_empty()) {
                    let mut body = vec![node];
                    body.extend(iter);
                    return (fs, body);
                }
                fs.push(node);
            }
        }
    }

    (fs, Vec::new())
}

enum TextBreak<'a> {
    /// No qualifying terminator; the node stays whole.
    None(CowStr<'a>, Span),
    /// The first sentence ends inside (or at the end of) this node.
    Split {
        head: (CowStr<'a>, Span),
        tail: Option<(CowStr<'a>, Span)>,
    },
}

fn break_text<'a>(content: CowStr<'a>, span: Span, has_next: bool) -> TextBreak<'a> {
    if let Some(ws) = terminator_index(&content) {
        let head_len = content[..ws].trim_end().len();
        let skipped = content[ws..].len() - content[ws..].trim_start().len();
        let tail_start = ws + skipped;
        let head = (
            slice_cow(&content, 0, head_len),
            Span::new(span.start, span.start + head_len as u32),
        );
        let tail = if tail_start < content.len() {
            Some((
                slice_cow(&content, tail_start, content.len()),
                Span::new(span.start + tail_start as u32, span.end),
            ))
        } else {
            None
        };
        return TextBreak::Split { head, tail };
    }

    // A terminator at the very end of the node qualifies when the sentence
    // continues at a tag boundary.
    if has_next && content.ends_with('.') {
        return TextBreak::Split {
            head: (content, span),
            tail: None,
        };
    }

    TextBreak::None(content, span)
}

/// Index of the first whitespace byte that follows a `.` with nothing but
/// periods in between.
fn terminator_index(s: &str) -> Option<usize> {
    let mut period = false;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'.' => period = true,
            b if is_whitespace(b) => {
                if period {
                    return Some(i);
                }
            }
            _ => period = false,
        }
    }
    None
}

fn is_sentence_break(node: &DocNode<'_>, is_first: bool) -> bool {
    match node {
        DocNode::StartElement(e) => !is_first && breaks_sentence(&e.name),
        DocNode::EndElement(e) => breaks_sentence(&e.name),
        _ => false,
    }
}

/// Paragraph-level elements that force the end of the first sentence.
fn breaks_sentence(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "p" | "pre" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
    )
}

fn slice_cow<'a>(c: &CowStr<'a>, start: usize, end: usize) -> CowStr<'a> {
    match c {
        Cow::Borrowed(s) => Cow::Borrowed(&s[start..end]),
        Cow::Owned(s) => Cow::Owned(s[start..end].to_string()),
    }
}
