//! # Parse Errors
//!
//! Error types for the parser. Every error carries a span and a stable
//! code so recovery logic can select a strategy without matching on
//! message text.
//!
//! ## Example
//!
//! ```rust
//! use scad_parser::error::ParseError;
//!
//! let error = ParseError::unexpected_token(")", "identifier");
//! assert_eq!(error.code(), "E001");
//! ```

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// PARSE ERROR
// =============================================================================

/// A parse error with location information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseError {
    /// Error kind with details.
    pub kind: ParseErrorKind,
    /// Source location of the error.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub const fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create an unexpected token error at an unknown location.
    pub fn unexpected_token(found: &str, expected: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedToken {
                found: found.to_string(),
                expected: expected.to_string(),
            },
            Span::zero(),
        )
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: &str) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEof {
                expected: expected.to_string(),
            },
            Span::zero(),
        )
    }

    /// Create a missing token error.
    pub fn missing_token(expected: &str) -> Self {
        Self::new(
            ParseErrorKind::MissingToken {
                expected: expected.to_string(),
            },
            Span::zero(),
        )
    }

    /// Create an extra token error.
    pub fn extra_token(found: &str) -> Self {
        Self::new(
            ParseErrorKind::ExtraToken {
                found: found.to_string(),
            },
            Span::zero(),
        )
    }

    /// Attach a span to this error.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Stable error code for this error.
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.kind, self.span.start.byte)
    }
}

impl std::error::Error for ParseError {}

// =============================================================================
// PARSE ERROR KIND
// =============================================================================

/// Kinds of parse errors.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ParseErrorKind {
    /// Found a token other than the one expected.
    #[error("unexpected token '{found}', expected {expected}")]
    UnexpectedToken {
        /// Token that was found.
        found: String,
        /// Description of what was expected.
        expected: String,
    },

    /// Input ended mid-construct.
    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof {
        /// Description of what was expected.
        expected: String,
    },

    /// A required token is absent but the construct is otherwise intact.
    #[error("missing {expected}")]
    MissingToken {
        /// Description of the absent token.
        expected: String,
    },

    /// A stray token that does not belong to any construct.
    #[error("extra token '{found}'")]
    ExtraToken {
        /// The stray token text.
        found: String,
    },

    /// Number literal that does not parse as f64.
    #[error("invalid number '{text}'")]
    InvalidNumber {
        /// The invalid text.
        text: String,
    },

    /// String literal without a closing quote.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// Nesting deeper than the parser is willing to recurse into.
    #[error("nesting exceeds the maximum depth of {limit}")]
    NestingTooDeep {
        /// The depth limit that was hit.
        limit: usize,
    },
}

impl ParseErrorKind {
    /// Stable error code, used to pick a recovery strategy.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnexpectedToken { .. } => "E001",
            Self::UnexpectedEof { .. } => "E002",
            Self::MissingToken { .. } => "E003",
            Self::ExtraToken { .. } => "E004",
            Self::InvalidNumber { .. } => "E005",
            Self::UnterminatedString => "E006",
            Self::NestingTooDeep { .. } => "E007",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
