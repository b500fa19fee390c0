//! Markup tokenizer and element/comment builder for the HTML flavor.
//!
//! Recognizes start elements, end elements, and HTML comments beginning at
//! a `<`, with local error recovery: any malformed sequence becomes an
//! `Erroneous` node spanning exactly the `<`, and the scanner resumes from
//! the byte after it, so the characters consumed while attempting the tag
//! are re-scanned as ordinary text.

use std::borrow::Cow;

use crate::error::{ErrorCode, ParseError};
use crate::scan::Scanner;
use crate::span::Span;
use crate::tree::{
    AttrKind, Attribute, CowStr, DocNode, EndElement, Erroneous, HtmlComment, StartElement,
};

/// Parse one markup construct; the scanner must be positioned at `<`.
///
/// Returns an `Erroneous` node (with the scanner already reset past the
/// `<`) for every malformed sequence. The only fatal case, reported as
/// `Err`, is an HTML comment left open at end of content.
pub(crate) fn markup<'a>(sc: &mut Scanner<'a>, base: u32) -> Result<DocNode<'a>, ParseError> {
    let lt = sc.pos();
    debug_assert_eq!(sc.peek(), Some(b'<'));
    sc.bump(1);

    let node = match sc.peek() {
        Some(b) if b.is_ascii_alphabetic() => start_element(sc, base, lt),
        Some(b'/') => end_element(sc, base, lt),
        Some(b'!') if sc.peek_at(1) == Some(b'-') && sc.peek_at(2) == Some(b'-') => {
            return html_comment(sc, base, lt);
        }
        _ => None,
    };

    Ok(node.unwrap_or_else(|| recover(sc, base, lt)))
}

/// Wrap the offending `<` and resume scanning from the byte after it.
fn recover<'a>(sc: &mut Scanner<'a>, base: u32, lt: usize) -> DocNode<'a> {
    sc.reset(lt + 1);
    DocNode::Erroneous(Erroneous {
        code: ErrorCode::MalformedMarkup,
        body: Cow::Borrowed(sc.slice(lt, lt + 1)),
        span: Span::new(lt as u32, (lt + 1) as u32).shifted(base),
    })
}

fn start_element<'a>(sc: &mut Scanner<'a>, base: u32, lt: usize) -> Option<DocNode<'a>> {
    let name = read_name(sc)?;
    let mut attributes = Vec::new();

    loop {
        skip_tag_whitespace(sc)?;
        match sc.peek() {
            Some(b'/') if sc.peek_at(1) == Some(b'>') => {
                sc.bump(2);
                return Some(DocNode::StartElement(StartElement {
                    name,
                    attributes,
                    self_closing: true,
                    span: Span::new(lt as u32, sc.pos() as u32).shifted(base),
                }));
            }
            Some(b'>') => {
                sc.bump(1);
                return Some(DocNode::StartElement(StartElement {
                    name,
                    attributes,
                    self_closing: false,
                    span: Span::new(lt as u32, sc.pos() as u32).shifted(base),
                }));
            }
            Some(b) if b.is_ascii_alphabetic() => attributes.push(attribute(sc, base)?),
            _ => return None,
        }
    }
}

fn end_element<'a>(sc: &mut Scanner<'a>, base: u32, lt: usize) -> Option<DocNode<'a>> {
    sc.bump(1); // '/'
    let name = read_name(sc)?;
    skip_tag_whitespace(sc)?;
    if sc.peek() != Some(b'>') {
        return None;
    }
    sc.bump(1);
    Some(DocNode::EndElement(EndElement {
        name,
        span: Span::new(lt as u32, sc.pos() as u32).shifted(base),
    }))
}

/// Capture a `<!-- ... -->` comment whole, delimiters included.
///
/// Comments terminate only at `-->`; reaching end of content first has no
/// recovery point and aborts the parse.
fn html_comment<'a>(sc: &mut Scanner<'a>, base: u32, lt: usize) -> Result<DocNode<'a>, ParseError> {
    sc.bump(3); // "!--"
    loop {
        match sc.find(b'-') {
            Some(dash) => {
                sc.reset(dash);
                if sc.peek_at(1) == Some(b'-') && sc.peek_at(2) == Some(b'>') {
                    sc.bump(3);
                    return Ok(DocNode::Comment(HtmlComment {
                        content: Cow::Borrowed(sc.slice(lt, sc.pos())),
                        span: Span::new(lt as u32, sc.pos() as u32).shifted(base),
                    }));
                }
                sc.bump(1);
            }
            None => {
                let end = sc.input().len();
                sc.reset(end);
                return Err(ParseError::unterminated_comment(
                    Span::new(lt as u32, end as u32).shifted(base),
                ));
            }
        }
    }
}

/// Skip whitespace inside a tag, failing the tag attempt when a block-tag
/// introducer line is reached.
fn skip_tag_whitespace(sc: &mut Scanner<'_>) -> Option<()> {
    sc.skip_whitespace();
    if sc.peek() == Some(b'@') && sc.at_line_start() {
        return None;
    }
    Some(())
}

/// Element name: an ASCII letter followed by letters, digits, or `-`.
fn read_name<'a>(sc: &mut Scanner<'a>) -> Option<CowStr<'a>> {
    let start = sc.pos();
    match sc.peek() {
        Some(b) if b.is_ascii_alphabetic() => sc.bump(1),
        _ => return None,
    }
    while let Some(b) = sc.peek() {
        if b.is_ascii_alphanumeric() || b == b'-' {
            sc.bump(1);
        } else {
            break;
        }
    }
    Some(Cow::Borrowed(sc.slice(start, sc.pos())))
}

/// Attribute name: an ASCII letter followed by letters, digits, or
/// `-`, `:`, `.`, `_`.
fn read_attr_name<'a>(sc: &mut Scanner<'a>) -> Option<CowStr<'a>> {
    let start = sc.pos();
    match sc.peek() {
        Some(b) if b.is_ascii_alphabetic() => sc.bump(1),
        _ => return None,
    }
    while let Some(b) = sc.peek() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b':' | b'.' | b'_') {
            sc.bump(1);
        } else {
            break;
        }
    }
    Some(Cow::Borrowed(sc.slice(start, sc.pos())))
}

fn attribute<'a>(sc: &mut Scanner<'a>, base: u32) -> Option<Attribute<'a>> {
    let start = sc.pos();
    let name = read_attr_name(sc)?;
    let name_end = sc.pos();

    skip_tag_whitespace(sc)?;
    if sc.peek() != Some(b'=') {
        // Valueless attribute; the whitespace just consumed separates it
        // from whatever follows.
        return Some(Attribute {
            name,
            kind: AttrKind::Empty,
            value: None,
            span: Span::new(start as u32, name_end as u32).shifted(base),
        });
    }
    sc.bump(1);
    skip_tag_whitespace(sc)?;

    let (kind, value) = match sc.peek()? {
        q @ (b'"' | b'\'') => {
            sc.bump(1);
            let vstart = sc.pos();
            loop {
                match sc.peek() {
                    None => return None,
                    Some(b) if b == q => break,
                    Some(b'@') if sc.at_line_start() => return None,
                    Some(_) => sc.bump(1),
                }
            }
            let value = sc.slice(vstart, sc.pos());
            sc.bump(1); // closing quote
            let kind = if q == b'"' {
                AttrKind::DoubleQuoted
            } else {
                AttrKind::SingleQuoted
            };
            (kind, value)
        }
        _ => {
            let vstart = sc.pos();
            while let Some(b) = sc.peek() {
                if crate::scan::is_whitespace(b) || b == b'>' {
                    break;
                }
                if b == b'/' && sc.peek_at(1) == Some(b'>') {
                    break;
                }
                sc.bump(1);
            }
            if sc.pos() == vstart {
                return None; // '=' with nothing after it
            }
            (AttrKind::Unquoted, sc.slice(vstart, sc.pos()))
        }
    };

    Some(Attribute {
        name,
        kind,
        value: Some(Cow::Borrowed(value)),
        span: Span::new(start as u32, sc.pos() as u32).shifted(base),
    })
}
