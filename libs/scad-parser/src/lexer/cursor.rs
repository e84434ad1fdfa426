//! # Character Cursor
//!
//! Peekable character cursor used by the lexer. Tracks byte offset, line
//! and column as it advances so every token gets a precise span.
//!
//! ## Example
//!
//! ```rust
//! use scad_parser::lexer::Cursor;
//!
//! let mut cursor = Cursor::new("abc");
//! assert_eq!(cursor.peek(), Some('a'));
//! cursor.advance();
//! assert_eq!(cursor.peek(), Some('b'));
//! ```

use crate::span::Position;

// =============================================================================
// CURSOR
// =============================================================================

/// Character cursor with position tracking.
pub struct Cursor<'a> {
    /// Source text.
    source: &'a str,
    /// Current byte offset.
    byte: usize,
    /// Current line (0-based).
    line: usize,
    /// Current column (0-based).
    column: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of the source.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            byte: 0,
            line: 0,
            column: 0,
        }
    }

    /// Get the current position.
    pub fn position(&self) -> Position {
        Position::new(self.byte, self.line, self.column)
    }

    /// Check if the cursor has consumed all input.
    pub fn is_eof(&self) -> bool {
        self.byte >= self.source.len()
    }

    /// Peek at the current character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.source[self.byte..].chars().next()
    }

    /// Peek one character past the current one.
    pub fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.byte..].chars();
        chars.next();
        chars.next()
    }

    /// Consume and return the current character.
    ///
    /// ## Returns
    ///
    /// The consumed character, or None at EOF.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.byte += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Advance while the predicate holds.
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_empty() {
        let cursor = Cursor::new("");
        assert!(cursor.is_eof());
        assert_eq!(cursor.peek(), None);
    }

    #[test]
    fn test_cursor_peek_does_not_consume() {
        let cursor = Cursor::new("xy");
        assert_eq!(cursor.peek(), Some('x'));
        assert_eq!(cursor.peek(), Some('x'));
        assert_eq!(cursor.peek_next(), Some('y'));
    }

    #[test]
    fn test_cursor_advance_tracks_bytes() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.position().byte, 1);
        assert_eq!(cursor.advance(), Some('b'));
        assert!(cursor.is_eof());
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn test_cursor_newline_resets_column() {
        let mut cursor = Cursor::new("a\nbc");
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.position().line, 1);
        assert_eq!(cursor.position().column, 0);
        cursor.advance();
        assert_eq!(cursor.position().column, 1);
    }

    #[test]
    fn test_cursor_advance_while() {
        let mut cursor = Cursor::new("size42");
        cursor.advance_while(|c| c.is_alphabetic());
        assert_eq!(cursor.peek(), Some('4'));
        assert_eq!(cursor.position().byte, 4);
    }

    #[test]
    fn test_cursor_multibyte() {
        let mut cursor = Cursor::new("é!");
        assert_eq!(cursor.advance(), Some('é'));
        assert_eq!(cursor.position().byte, 2);
        assert_eq!(cursor.peek(), Some('!'));
    }
}
