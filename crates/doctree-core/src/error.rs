use crate::span::Span;
use std::fmt;

/// Fixed diagnostic codes carried by in-tree fault nodes.
///
/// Recoverable syntax problems never abort the parse; they are recorded as
/// [`Erroneous`](crate::tree::Erroneous) nodes holding one of these codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A `<` that could not start a valid element, end element, or comment,
    /// or a tag left unterminated at the end of its region.
    MalformedMarkup,
}

impl ErrorCode {
    /// Stable symbolic name of this code.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MalformedMarkup => "malformed.markup",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error kinds for unrecoverable parse failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// An HTML comment with no closing `-->` before end of input. There is
    /// no plausible resume point, so no partial tree is returned.
    UnterminatedComment,
}

/// An unrecoverable parse failure with location information.
///
/// Malformed markup never produces a `ParseError`; it is recovered in-tree.
/// Only structural failures with no resume point surface here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,
    /// Source location where the failure occurred
    pub span: Option<Span>,
    /// Failure categorization
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Create an error for an HTML comment left open at end of input.
    pub fn unterminated_comment(span: Span) -> Self {
        Self {
            message: "unterminated HTML comment".to_string(),
            span: Some(span),
            kind: ParseErrorKind::UnterminatedComment,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(span) = self.span {
            write!(f, " at bytes {}..{}", span.start, span.end)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
