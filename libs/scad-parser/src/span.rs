//! # Source Positions and Spans
//!
//! Positions carry byte offset, line and column so spans can serve both
//! byte-oriented edits and editor-facing (row, column) diagnostics.
//!
//! ## Example
//!
//! ```rust
//! use scad_parser::span::{Position, Span};
//!
//! let span = Span::from_bytes(0, 4);
//! assert_eq!(span.start.byte, 0);
//! assert_eq!(span.len(), 4);
//! ```

use serde::{Deserialize, Serialize};

// =============================================================================
// POSITION
// =============================================================================

/// A position in source text.
///
/// All fields are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the source.
    pub byte: usize,
    /// Line number (0-based).
    pub line: usize,
    /// Column number (0-based).
    pub column: usize,
}

impl Position {
    /// Create a new position.
    pub const fn new(byte: usize, line: usize, column: usize) -> Self {
        Self { byte, line, column }
    }

    /// Position at the start of the source.
    pub const fn zero() -> Self {
        Self::new(0, 0, 0)
    }
}

// =============================================================================
// SPAN
// =============================================================================

/// A range in source text.
///
/// `start` is inclusive, `end` is exclusive.
///
/// ## Example
///
/// ```rust
/// use scad_parser::span::Span;
///
/// // For source "cube(10);" the span of "cube" would be:
/// let span = Span::from_bytes(0, 4);
/// assert_eq!(span.len(), 4);
/// assert!(span.contains(2));
/// assert!(!span.contains(4)); // end is exclusive
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive).
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
}

impl Span {
    /// Create a span from two positions.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from byte offsets only.
    ///
    /// Line and column are zeroed; intended for tests and byte-oriented
    /// callers.
    pub const fn from_bytes(start: usize, end: usize) -> Self {
        Self {
            start: Position::new(start, 0, 0),
            end: Position::new(end, 0, 0),
        }
    }

    /// Empty span at the source start.
    pub const fn zero() -> Self {
        Self::new(Position::zero(), Position::zero())
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end.byte.saturating_sub(self.start.byte)
    }

    /// True if the span has zero length.
    pub fn is_empty(&self) -> bool {
        self.start.byte >= self.end.byte
    }

    /// Check if this span contains a byte offset.
    pub fn contains(&self, byte: usize) -> bool {
        byte >= self.start.byte && byte < self.end.byte
    }

    /// Create a span covering both this span and another.
    pub fn merge(&self, other: &Span) -> Span {
        let start = if self.start.byte <= other.start.byte {
            self.start
        } else {
            other.start
        };
        let end = if self.end.byte >= other.end.byte {
            self.end
        } else {
            other.end
        };
        Span::new(start, end)
    }
}

/// Types that carry a source span.
pub trait Spanned {
    /// The source span of this item.
    fn span(&self) -> Span;
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_from_bytes() {
        let span = Span::from_bytes(5, 15);
        assert_eq!(span.start.byte, 5);
        assert_eq!(span.end.byte, 15);
        assert_eq!(span.len(), 10);
    }

    #[test]
    fn test_span_is_empty() {
        assert!(Span::from_bytes(5, 5).is_empty());
        assert!(Span::zero().is_empty());
        assert!(!Span::from_bytes(0, 1).is_empty());
    }

    #[test]
    fn test_span_contains() {
        let span = Span::from_bytes(5, 10);
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
    }

    #[test]
    fn test_span_merge() {
        let a = Span::from_bytes(0, 5);
        let b = Span::from_bytes(10, 15);
        let merged = a.merge(&b);
        assert_eq!(merged.start.byte, 0);
        assert_eq!(merged.end.byte, 15);
    }

    #[test]
    fn test_position_fields() {
        let pos = Position::new(12, 1, 3);
        assert_eq!(pos.byte, 12);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 3);
    }
}
