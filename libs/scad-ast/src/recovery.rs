//! # Error Recovery Strategies
//!
//! Pure strategies that decide where the build resumes after a damaged
//! region of the CST. A strategy never mutates the tree; it inspects
//! the error node and its surroundings and returns the node at which
//! to continue, or `None` when nothing salvageable follows.
//!
//! Strategy selection keys on the stable error code, so recovery
//! behavior cannot drift when messages are reworded.

use crate::error::{ErrorCode, ParserError};
use scad_parser::{CstNode, NodeKind};
use tracing::debug;

// =============================================================================
// STRATEGY TRAIT
// =============================================================================

/// A recovery strategy. Implementations are stateless.
pub trait RecoveryStrategy {
    /// Strategy name, for logging.
    fn name(&self) -> &'static str;

    /// Whether this strategy applies to the given error.
    fn can_handle(&self, error: &ParserError) -> bool;

    /// Find the node at which the build resumes. `None` means the rest
    /// of the damaged region is abandoned.
    fn recover<'a>(
        &self,
        root: &'a CstNode,
        error_node: &CstNode,
        error: &ParserError,
    ) -> Option<&'a CstNode>;
}

/// Next sibling of the statement enclosing `target`, scanning the
/// top-level statement list.
fn next_statement_after<'a>(root: &'a CstNode, target: &CstNode) -> Option<&'a CstNode> {
    let end = target.span.end.byte;
    root.children
        .iter()
        .find(|stmt| stmt.span.start.byte >= end && !matches!(stmt.kind, NodeKind::Error))
}

// =============================================================================
// STRATEGIES
// =============================================================================

/// Abandon the damaged statement and resume at the next one.
///
/// The default strategy: applies to any error, so it sits last in the
/// factory's list.
pub struct SkipToNextStatement;

impl RecoveryStrategy for SkipToNextStatement {
    fn name(&self) -> &'static str {
        "skip_to_next_statement"
    }

    fn can_handle(&self, _error: &ParserError) -> bool {
        true
    }

    fn recover<'a>(
        &self,
        root: &'a CstNode,
        error_node: &CstNode,
        _error: &ParserError,
    ) -> Option<&'a CstNode> {
        next_statement_after(root, error_node)
    }
}

/// Treat a missing token as present and resume inside the same
/// statement. Applies when the error names the token it expected.
pub struct InsertMissingToken;

impl RecoveryStrategy for InsertMissingToken {
    fn name(&self) -> &'static str {
        "insert_missing_token"
    }

    fn can_handle(&self, error: &ParserError) -> bool {
        matches!(
            error.code,
            ErrorCode::MissingToken | ErrorCode::MissingSemicolon | ErrorCode::UnmatchedToken
        ) && error.expected_token.is_some()
    }

    fn recover<'a>(
        &self,
        root: &'a CstNode,
        error_node: &CstNode,
        _error: &ParserError,
    ) -> Option<&'a CstNode> {
        // The parser already materialized a Missing node, so the
        // enclosing statement is structurally complete. Resume at the
        // statement containing the error, falling back to the next one.
        root.children
            .iter()
            .find(|stmt| stmt.span.contains(error_node.span.start.byte))
            .or_else(|| next_statement_after(root, error_node))
    }
}

/// Drop a stray token and resume at the construct after it.
pub struct DeleteExtraToken;

impl RecoveryStrategy for DeleteExtraToken {
    fn name(&self) -> &'static str {
        "delete_extra_token"
    }

    fn can_handle(&self, error: &ParserError) -> bool {
        error.code == ErrorCode::UnexpectedToken
    }

    fn recover<'a>(
        &self,
        root: &'a CstNode,
        error_node: &CstNode,
        _error: &ParserError,
    ) -> Option<&'a CstNode> {
        next_statement_after(root, error_node)
    }
}

// =============================================================================
// FACTORY
// =============================================================================

/// Picks the strategy for an error. Specific strategies are tried
/// before the catch-all skip.
pub struct RecoveryStrategyFactory {
    strategies: Vec<Box<dyn RecoveryStrategy + Send + Sync>>,
}

impl Default for RecoveryStrategyFactory {
    fn default() -> Self {
        Self {
            strategies: vec![
                Box::new(InsertMissingToken),
                Box::new(DeleteExtraToken),
                Box::new(SkipToNextStatement),
            ],
        }
    }
}

impl RecoveryStrategyFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first strategy whose `can_handle` accepts the error.
    pub fn for_error(&self, error: &ParserError) -> &(dyn RecoveryStrategy + Send + Sync) {
        let strategy = self
            .strategies
            .iter()
            .find(|s| s.can_handle(error))
            .unwrap_or_else(|| {
                // SkipToNextStatement accepts everything.
                unreachable!("strategy list ends with a catch-all")
            });
        debug!(code = ?error.code, strategy = strategy.name(), "selected recovery strategy");
        strategy.as_ref()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::SourceLocation;

    fn parse(source: &str) -> scad_parser::Cst {
        scad_parser::parse(source)
    }

    #[test]
    fn test_factory_selects_by_code() {
        let factory = RecoveryStrategyFactory::new();
        let loc = SourceLocation::zero();

        let e = ParserError::missing_semicolon(loc, "x = 1");
        assert_eq!(factory.for_error(&e).name(), "insert_missing_token");

        let e = ParserError::unexpected_token(")", loc, ")");
        assert_eq!(factory.for_error(&e).name(), "delete_extra_token");

        let e = ParserError::type_mismatch("number", "string", loc, "\"a\"");
        assert_eq!(factory.for_error(&e).name(), "skip_to_next_statement");
    }

    #[test]
    fn test_skip_resumes_at_following_statement() {
        let cst = parse("cube(@); sphere(5);");
        let error_node = cst
            .root
            .children
            .iter()
            .find(|c| c.has_error())
            .expect("damaged statement");

        let error = ParserError::unexpected_token("@", SourceLocation::zero(), "@");
        let resumed = DeleteExtraToken
            .recover(&cst.root, error_node, &error)
            .expect("a statement follows");
        assert!(resumed.text.as_deref() != Some("@"));
        assert!(resumed.span.start.byte > error_node.span.start.byte);
    }

    #[test]
    fn test_skip_returns_none_at_end_of_input() {
        let cst = parse("cube(@);");
        let error_node = cst
            .root
            .children
            .iter()
            .find(|c| c.has_error())
            .expect("damaged statement");

        let error = ParserError::unexpected_token("@", SourceLocation::zero(), "@");
        assert!(SkipToNextStatement
            .recover(&cst.root, error_node, &error)
            .is_none());
    }

    #[test]
    fn test_insert_missing_token_stays_in_statement() {
        let cst = parse("x = 1\ny = 2;");
        // The first assignment carries a Missing semicolon child.
        let damaged = cst
            .root
            .children
            .iter()
            .find(|c| c.has_error())
            .expect("statement with missing token");

        let error = ParserError::missing_semicolon(
            SourceLocation::from(damaged.span),
            "x = 1",
        );
        let resumed = InsertMissingToken
            .recover(&cst.root, damaged, &error)
            .expect("recoverable");
        assert_eq!(resumed.span.start.byte, damaged.span.start.byte);
    }
}
