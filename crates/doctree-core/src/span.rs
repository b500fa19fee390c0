//! Source location tracking for doc tree nodes.
//!
//! Every tree node includes a `Span` indicating its position in the comment
//! content. Offsets are relative to the decoration-stripped content unless a
//! base offset was configured on the parser, in which case they point into
//! the original source file.

/// A byte range in the comment content.
///
/// Spans use byte offsets (not character offsets) for efficiency.
/// Both `start` and `end` are inclusive-exclusive: `[start, end)`.
///
/// # Example
///
/// ```rust
/// use doctree_core::span::Span;
///
/// let span = Span::new(4, 5);
/// assert_eq!(span.len(), 1);
/// assert!(span.contains(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: u32,
    /// Ending byte offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a new span from byte offsets.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Get the length of this span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Check if this span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if this span contains a byte offset.
    #[inline]
    pub const fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Merge two spans into one covering both.
    ///
    /// ```rust
    /// use doctree_core::span::Span;
    ///
    /// let name = Span::new(1, 3);
    /// let value = Span::new(8, 11);
    /// assert_eq!(name.merge(value), Span::new(1, 11));
    /// ```
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Shift both offsets by a base, mapping content-relative positions
    /// into source-file coordinates.
    #[inline]
    pub const fn shifted(self, base: u32) -> Span {
        Span {
            start: self.start + base,
            end: self.end + base,
        }
    }
}
