//! Doc tree node types produced by the parser.
//!
//! This module contains all the tree node types for a parsed documentation
//! comment. The tree is designed to be:
//!
//! - **Zero-copy**: Uses `Cow<'a, str>` to borrow from input when possible
//! - **Span-tracked**: Every node includes source location information
//! - **Closed**: One variant per node kind, matched exhaustively

use crate::error::ErrorCode;
use crate::span::Span;

/// Borrowed or owned string type for zero-copy parsing.
pub type CowStr<'a> = std::borrow::Cow<'a, str>;

/// Markup flavor of a documentation comment, chosen once per comment.
///
/// The flavor affects how inline punctuation is interpreted: in `Html` mode
/// a `<` introduces an element or comment, in `Markdown` mode it is ordinary
/// text. Block tags are recognized in both flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Traditional block comments; `<`/`</`/`<!--` start markup constructs.
    Html,
    /// Line comments; markup punctuation is literal text.
    Markdown,
}

/// A parsed documentation comment.
///
/// The root of the tree, constructed exactly once per source comment and
/// never mutated afterward. It holds the first sentence, the remaining body,
/// and the trailing block tags, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct DocComment<'a> {
    /// Markup flavor this comment was parsed under.
    pub markup: Markup,
    /// Nodes forming the summary sentence.
    pub first_sentence: Vec<DocNode<'a>>,
    /// Nodes between the first sentence and the first block tag.
    pub body: Vec<DocNode<'a>>,
    /// Block tags in source order.
    pub block_tags: Vec<BlockTag<'a>>,
    /// Source span covering the entire comment content.
    pub span: Span,
}

impl<'a> DocComment<'a> {
    /// Iterate over every recovered syntax fault in the tree, including
    /// those nested inside block tags.
    ///
    /// This is the diagnostics surface: each fault carries a fixed
    /// [`ErrorCode`] and the exact offending text.
    pub fn erroneous(&self) -> impl Iterator<Item = &Erroneous<'a>> {
        self.first_sentence
            .iter()
            .chain(self.body.iter())
            .chain(self.block_tags.iter().flat_map(|t| t.content.iter()))
            .filter_map(|n| match n {
                DocNode::Erroneous(e) => Some(e),
                _ => None,
            })
    }

    /// Iterate over all nodes of the comment in source order.
    pub fn nodes(&self) -> impl Iterator<Item = &DocNode<'a>> {
        self.first_sentence
            .iter()
            .chain(self.body.iter())
            .chain(self.block_tags.iter().flat_map(|t| t.content.iter()))
    }
}

/// A single node of the doc tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DocNode<'a> {
    /// Literal text run.
    Text(Text<'a>),
    /// HTML start element, possibly self-closing.
    StartElement(StartElement<'a>),
    /// HTML end element.
    EndElement(EndElement<'a>),
    /// HTML comment, delimiters included.
    Comment(HtmlComment<'a>),
    /// A recovered syntax fault.
    Erroneous(Erroneous<'a>),
    /// Uninterpreted text (Markdown flavor only).
    RawText(RawText<'a>),
}

impl<'a> DocNode<'a> {
    /// Source span of this node.
    pub fn span(&self) -> Span {
        match self {
            DocNode::Text(t) => t.span,
            DocNode::StartElement(e) => e.span,
            DocNode::EndElement(e) => e.span,
            DocNode::Comment(c) => c.span,
            DocNode::Erroneous(e) => e.span,
            DocNode::RawText(r) => r.span,
        }
    }
}

/// Literal text content.
#[derive(Debug, Clone, PartialEq)]
pub struct Text<'a> {
    /// The text content.
    pub content: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// Uninterpreted text content, produced only in Markdown flavor.
#[derive(Debug, Clone, PartialEq)]
pub struct RawText<'a> {
    /// The text content, markup punctuation included verbatim.
    pub content: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// An HTML start element such as `<p>` or `<hr/>`.
///
/// Unpaired start elements are legal; the parser never requires a matching
/// end element.
#[derive(Debug, Clone, PartialEq)]
pub struct StartElement<'a> {
    /// Element name, case as written.
    pub name: CowStr<'a>,
    /// Attributes in source order (possibly empty).
    pub attributes: Vec<Attribute<'a>>,
    /// Whether the element ended with `/>`.
    pub self_closing: bool,
    /// Source span, `<` through `>` inclusive.
    pub span: Span,
}

/// An HTML end element such as `</p>`.
#[derive(Debug, Clone, PartialEq)]
pub struct EndElement<'a> {
    /// Element name, case as written.
    pub name: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// An HTML comment, `<!--` through `-->` inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlComment<'a> {
    /// The full comment text including delimiters.
    pub content: CowStr<'a>,
    /// Source span.
    pub span: Span,
}

/// A recovered syntax fault.
///
/// Represents a single contiguous malformed span; scanning resumed
/// immediately after it, so every subsequent node keeps an exact offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Erroneous<'a> {
    /// Fixed diagnostic code identifying the syntax problem.
    pub code: ErrorCode,
    /// The exact offending text that triggered recovery.
    pub body: CowStr<'a>,
    /// Source span of the offending text.
    pub span: Span,
}

/// How an attribute value was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    /// No `=` and no value.
    Empty,
    /// Bare value, terminated by whitespace or `>`.
    Unquoted,
    /// Value enclosed in `'...'`.
    SingleQuoted,
    /// Value enclosed in `"..."`.
    DoubleQuoted,
}

/// An attribute inside a start element.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute<'a> {
    /// Attribute name, case as written.
    pub name: CowStr<'a>,
    /// How the value was written.
    pub kind: AttrKind,
    /// Raw value text, quotes stripped; `None` for valueless attributes.
    pub value: Option<CowStr<'a>>,
    /// Source span.
    pub span: Span,
}

/// Classification of a block tag name.
///
/// Classification is syntactic only; unknown names are still valid tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Author,
    Deprecated,
    Param,
    Return,
    See,
    Since,
    Throws,
    Version,
    /// Any name not listed above.
    Unknown,
}

impl TagKind {
    /// Classify a tag name as written after the `@` introducer.
    pub fn from_name(name: &str) -> TagKind {
        match name {
            "author" => TagKind::Author,
            "deprecated" => TagKind::Deprecated,
            "param" => TagKind::Param,
            "return" => TagKind::Return,
            "see" => TagKind::See,
            "since" => TagKind::Since,
            "throws" => TagKind::Throws,
            "version" => TagKind::Version,
            _ => TagKind::Unknown,
        }
    }
}

/// A block tag such as `@author jjg`, introduced at the start of a line.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTag<'a> {
    /// Classification of the tag name.
    pub kind: TagKind,
    /// Tag name as written, without the `@`.
    pub name: CowStr<'a>,
    /// The tag's argument text, parsed with the same machinery as the body.
    pub content: Vec<DocNode<'a>>,
    /// Source span, from the `@` to the end of the argument text.
    pub span: Span,
}
