//! # Source Locations
//!
//! AST-facing source locations, derived once from CST spans and
//! immutable afterwards. Used for diagnostics, navigation and edit
//! mapping.
//!
//! ## Example
//!
//! ```rust
//! use scad_ast::location::SourceLocation;
//! use scad_parser::Span;
//!
//! let loc = SourceLocation::from(Span::from_bytes(0, 4));
//! assert_eq!(loc.start.byte, 0);
//! assert_eq!(loc.end.byte, 4);
//! ```

use scad_parser::{Position, Span};
use serde::{Deserialize, Serialize};

// =============================================================================
// SOURCE LOCATION
// =============================================================================

/// A resolved location in the current session's source text.
///
/// Positions are 0-based and carry both (line, column) and byte
/// offsets, so the same location serves editor coordinates and text
/// edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Start position (inclusive).
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
}

impl SourceLocation {
    /// Create a location from explicit positions.
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Empty location at the source start.
    pub const fn zero() -> Self {
        Self::new(Position::zero(), Position::zero())
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end.byte.saturating_sub(self.start.byte)
    }

    /// True if the location covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start.byte >= self.end.byte
    }

    /// Check if a byte offset falls inside this location.
    pub fn contains(&self, byte: usize) -> bool {
        byte >= self.start.byte && byte < self.end.byte
    }

    /// Location covering both this and another location.
    pub fn merge(&self, other: &SourceLocation) -> SourceLocation {
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
        SourceLocation::new(start, end)
    }
}

impl From<Span> for SourceLocation {
    fn from(span: Span) -> Self {
        Self::new(span.start, span.end)
    }
}

impl From<SourceLocation> for Span {
    fn from(loc: SourceLocation) -> Self {
        Span::new(loc.start, loc.end)
    }
}

// =============================================================================
// TESTS
// =============================================================================
