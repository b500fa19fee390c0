//! # DocTree Core
//!
//! A recoverable parser for structured documentation comments.
//!
//! DocTree turns the text of a doc comment into a tree distinguishing a
//! first sentence, a body, and a sequence of block tags, while tokenizing
//! embedded HTML-like markup with exact source-position tracking. Malformed
//! markup never aborts the parse: the offending fragment is wrapped in an
//! `Erroneous` node and scanning resumes from the next plausible boundary.
//!
//! ## Quick Start
//!
//! ```rust
//! use doctree_core::{DocParser, Markup};
//!
//! let parser = DocParser::new(Markup::Html);
//! let doc = parser.parse("Returns the size. Never negative.").unwrap();
//!
//! assert_eq!(doc.first_sentence.len(), 1);
//! assert_eq!(doc.body.len(), 1);
//! ```
//!
//! ## Error Recovery
//!
//! ```rust
//! use doctree_core::{DocParser, Markup};
//!
//! // The bare '<' cannot start a tag; it becomes an in-tree fault node
//! // and parsing continues.
//! let doc = DocParser::new(Markup::Html).parse("abc < def").unwrap();
//! assert_eq!(doc.erroneous().count(), 1);
//! ```
//!
//! ## Flavors
//!
//! - [`Markup::Html`] - block comments; `<` introduces elements and comments
//! - [`Markup::Markdown`] - line comments; markup punctuation is literal

pub mod error;
pub mod parser;
pub mod scan;
pub mod span;
pub mod strip;
pub mod tree;

mod html;
mod sentence;

pub use error::{ErrorCode, ParseError, ParseErrorKind};
pub use parser::DocParser;
pub use strip::{strip, StrippedComment};
pub use tree::{BlockTag, DocComment, DocNode, Markup, TagKind};
