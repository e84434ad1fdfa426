//! # Typed Parser Errors
//!
//! Structured errors surfaced by the AST builder. Every error carries a
//! stable code, a location, a snippet of the offending source, and at
//! least one suggested fix. Constructors pre-fill the message so call
//! sites stay one line.
//!
//! ## Example
//!
//! ```rust
//! use scad_ast::error::ParserError;
//! use scad_ast::location::SourceLocation;
//!
//! let error = ParserError::missing_semicolon(SourceLocation::zero(), "x = 10");
//! assert_eq!(error.code, scad_ast::error::ErrorCode::MissingSemicolon);
//! assert!(!error.suggestions.is_empty());
//! ```

use crate::location::SourceLocation;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ERROR CODE
// =============================================================================

/// Stable error codes.
///
/// Syntax codes describe structural damage in the CST; semantic codes
/// describe well-formed but meaningless constructs. Recovery strategy
/// selection keys on the code, never on the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Syntax
    MissingToken,
    UnexpectedToken,
    UnmatchedToken,
    MissingSemicolon,

    // Semantic
    UndefinedVariable,
    TypeMismatch,
    InvalidParameter,
    MissingRequiredParameter,
}

impl ErrorCode {
    /// True for structural (syntax) codes.
    pub const fn is_syntax(&self) -> bool {
        matches!(
            self,
            Self::MissingToken
                | Self::UnexpectedToken
                | Self::UnmatchedToken
                | Self::MissingSemicolon
        )
    }
}

// =============================================================================
// PARSER ERROR
// =============================================================================

/// A structured parse or build error.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ParserError {
    /// Stable code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Location of the offending construct.
    pub position: SourceLocation,
    /// Raw source text of the offending region.
    pub snippet: String,
    /// Suggested fixes, never empty.
    pub suggestions: Vec<String>,
    /// Extra context, e.g. the enclosing call name.
    pub context: Option<String>,
    /// Token the parser expected, when one is known. Drives the
    /// insert-missing-token recovery.
    pub expected_token: Option<String>,
}

impl ParserError {
    fn new(
        code: ErrorCode,
        message: String,
        position: SourceLocation,
        snippet: &str,
        suggestions: Vec<String>,
    ) -> Self {
        Self {
            code,
            message,
            position,
            snippet: snippet.to_string(),
            suggestions,
            context: None,
            expected_token: None,
        }
    }

    /// Attach context, e.g. the enclosing call name.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    // =========================================================================
    // SYNTAX CONSTRUCTORS
    // =========================================================================

    /// A required token is absent.
    pub fn missing_token(expected: &str, position: SourceLocation, snippet: &str) -> Self {
        let mut error = Self::new(
            ErrorCode::MissingToken,
            format!("missing {expected}"),
            position,
            snippet,
            vec![format!("insert '{expected}'")],
        );
        error.expected_token = Some(expected.to_string());
        error
    }

    /// A token appeared where it cannot belong.
    pub fn unexpected_token(found: &str, position: SourceLocation, snippet: &str) -> Self {
        Self::new(
            ErrorCode::UnexpectedToken,
            format!("unexpected token '{found}'"),
            position,
            snippet,
            vec![format!("remove '{found}'")],
        )
    }

    /// An opening delimiter with no matching closer.
    pub fn unmatched_token(open: &str, close: &str, position: SourceLocation, snippet: &str) -> Self {
        let mut error = Self::new(
            ErrorCode::UnmatchedToken,
            format!("unmatched '{open}', expected '{close}'"),
            position,
            snippet,
            vec![format!("insert '{close}' to match '{open}'")],
        );
        error.expected_token = Some(close.to_string());
        error
    }

    /// A statement is not terminated.
    pub fn missing_semicolon(position: SourceLocation, snippet: &str) -> Self {
        let mut error = Self::new(
            ErrorCode::MissingSemicolon,
            "missing ';' after statement".to_string(),
            position,
            snippet,
            vec!["insert ';' at the end of the statement".to_string()],
        );
        error.expected_token = Some(";".to_string());
        error
    }

    // =========================================================================
    // SEMANTIC CONSTRUCTORS
    // =========================================================================

    /// Reference to a name with no visible declaration.
    pub fn undefined_variable(name: &str, position: SourceLocation, snippet: &str) -> Self {
        Self::new(
            ErrorCode::UndefinedVariable,
            format!("undefined variable '{name}'"),
            position,
            snippet,
            vec![format!("declare '{name}' before this use")],
        )
    }

    /// A value of the wrong type.
    pub fn type_mismatch(
        expected: &str,
        found: &str,
        position: SourceLocation,
        snippet: &str,
    ) -> Self {
        Self::new(
            ErrorCode::TypeMismatch,
            format!("expected {expected}, found {found}"),
            position,
            snippet,
            vec![format!("provide a {expected} value")],
        )
    }

    /// A parameter that this call does not accept, or with an
    /// unusable value.
    pub fn invalid_parameter(name: &str, position: SourceLocation, snippet: &str) -> Self {
        Self::new(
            ErrorCode::InvalidParameter,
            format!("invalid parameter '{name}'"),
            position,
            snippet,
            vec![format!("check the spelling and value of '{name}'")],
        )
    }

    /// A required parameter is absent.
    pub fn missing_required_parameter(
        name: &str,
        call: &str,
        position: SourceLocation,
        snippet: &str,
    ) -> Self {
        Self::new(
            ErrorCode::MissingRequiredParameter,
            format!("'{call}' requires parameter '{name}'"),
            position,
            snippet,
            vec![format!("add '{name}=...' to the '{call}' call")],
        )
        .with_context(call)
    }
}

// =============================================================================
// TESTS
// =============================================================================
