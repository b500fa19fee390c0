//! Character-level scanner over decoration-stripped comment content.
//!
//! The scanner is the single source of truth for positions: every node
//! offset is derived from [`Scanner::pos`]. It exposes byte lookahead and
//! SIMD-accelerated jumps (via `memchr`) to the next markup-significant
//! byte, so plain text runs cost no per-character work.

use memchr::{memchr, memchr2};

/// Whitespace as the tokenizer and splitter understand it.
#[inline(always)]
pub(crate) const fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

/// Byte cursor with lookahead over the comment content.
pub struct Scanner<'a> {
    /// The complete content text.
    input: &'a str,
    /// Content as bytes for efficient scanning.
    bytes: &'a [u8],
    /// Current byte offset.
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given content.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    /// Get the current byte offset.
    #[inline(always)]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Check if all content has been consumed.
    #[inline(always)]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Peek at the next byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Peek `n` bytes past the current position.
    #[inline(always)]
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.bytes.get(self.pos + n).copied()
    }

    /// Consume `n` bytes, clamped to end of content.
    #[inline(always)]
    pub fn bump(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.bytes.len());
    }

    /// Move the cursor to an absolute offset.
    ///
    /// Used by error recovery to resume from the byte after a malformed
    /// `<`; this is the only way the cursor moves backward.
    #[inline(always)]
    pub fn reset(&mut self, pos: usize) {
        debug_assert!(pos <= self.bytes.len());
        self.pos = pos;
    }

    /// Consume whitespace bytes.
    #[inline]
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if !is_whitespace(b) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Check that only whitespace separates the cursor from the start of
    /// the current line (or the start of content).
    #[inline]
    pub fn at_line_start(&self) -> bool {
        for &b in self.bytes[..self.pos].iter().rev() {
            if b == b'\n' {
                return true;
            }
            if !is_whitespace(b) {
                return false;
            }
        }
        true
    }

    /// Jump to the next `<` or `@`, or end of content.
    ///
    /// Uses SIMD-accelerated scanning via `memchr`.
    #[inline(always)]
    pub fn seek_markup(&mut self) {
        self.pos = match memchr2(b'<', b'@', &self.bytes[self.pos..]) {
            Some(i) => self.pos + i,
            None => self.bytes.len(),
        };
    }

    /// Jump to the next `@`, or end of content.
    #[inline(always)]
    pub fn seek_at_sign(&mut self) {
        self.pos = match memchr(b'@', &self.bytes[self.pos..]) {
            Some(i) => self.pos + i,
            None => self.bytes.len(),
        };
    }

    /// Find the next occurrence of `byte` at or after the cursor.
    #[inline(always)]
    pub fn find(&self, byte: u8) -> Option<usize> {
        memchr(byte, &self.bytes[self.pos..]).map(|i| self.pos + i)
    }

    /// Get a slice of the content by byte offsets.
    #[inline(always)]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }

    /// Get the complete content text.
    #[inline(always)]
    pub fn input(&self) -> &'a str {
        self.input
    }
}
