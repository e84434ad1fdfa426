//! # Parser
//!
//! Recursive descent parser producing a Concrete Syntax Tree.
//!
//! Errors never abort the parse: a malformed statement becomes an
//! [`NodeKind::Error`] subtree covering the skipped tokens, and an
//! absent-but-required token becomes a [`NodeKind::Missing`] placeholder.
//! The surrounding statements still parse normally.
//!
//! ## Example
//!
//! ```rust
//! use scad_parser::lexer::Lexer;
//! use scad_parser::parser::Parser;
//!
//! let tokens = Lexer::new("cube(10);").tokenize();
//! let cst = Parser::new("cube(10);", tokens).parse();
//! assert!(cst.is_ok());
//! ```

mod collections;
mod control_flow;
mod declarations;
mod expressions;
mod operators;
mod postfix;
mod primaries;
mod statements;

use crate::cst::{Cst, CstNode, NodeKind};
use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::{Token, TokenKind};
use crate::span::{Position, Span};
use config::constants::MAX_PARSE_DEPTH;

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser.
pub struct Parser<'a> {
    /// Source text, used to slice error regions.
    source: &'a str,
    /// Token stream.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Current statement/expression nesting depth.
    depth: usize,
    /// Collected parse errors.
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser over a token stream.
    pub fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            current: 0,
            depth: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire source into a CST.
    ///
    /// The root span covers the first through last statement, so it is
    /// independent of surrounding whitespace and comments.
    pub fn parse(&mut self) -> Cst {
        let children = self.parse_statement_list(None);

        let start = children
            .first()
            .map(|c| c.span.start)
            .unwrap_or_else(|| self.current_position());
        let end = children.last().map(|c| c.span.end).unwrap_or(start);

        let root = CstNode::with_children(NodeKind::SourceFile, Span::new(start, end), children);
        Cst::new(root, std::mem::take(&mut self.errors))
    }

    /// Parse statements until EOF or the given terminator.
    ///
    /// Shared by the top level (`until` = None) and blocks
    /// (`until` = `}`). Failed statements become Error nodes.
    pub(super) fn parse_statement_list(&mut self, until: Option<TokenKind>) -> Vec<CstNode> {
        let mut children = Vec::new();

        while !self.is_at_end() && Some(self.peek_kind()) != until {
            // Stray semicolons are allowed between statements.
            if self.match_token(TokenKind::Semicolon) {
                continue;
            }

            let stmt_start = self.current_position();
            match self.parse_statement() {
                Ok(node) => children.push(node),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize();
                    children.push(self.error_node(stmt_start));
                }
            }
        }

        children
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    /// Get the current token.
    pub(super) fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or_else(|| {
            self.tokens.last().expect("token stream always ends with EOF")
        })
    }

    /// Get the current token kind.
    pub(super) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Check if the current token matches a kind.
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// Check if the token after the current one matches a kind.
    pub(super) fn check_next(&self, kind: TokenKind) -> bool {
        self.tokens
            .get(self.current + 1)
            .map(|t| t.kind == kind)
            .unwrap_or(false)
    }

    /// Check if at end of input.
    pub(super) fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Start position of the current token.
    pub(super) fn current_position(&self) -> Position {
        self.peek().span.start
    }

    /// Consume and return the current token.
    pub(super) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// The most recently consumed token.
    pub(super) fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    /// Consume a token of the expected kind or fail.
    pub(super) fn expect(&mut self, kind: TokenKind) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else if self.is_at_end() {
            Err(ParseError::new(
                ParseErrorKind::UnexpectedEof {
                    expected: kind.display().to_string(),
                },
                self.peek().span,
            ))
        } else {
            Err(ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    found: self.peek().text.clone(),
                    expected: kind.display().to_string(),
                },
                self.peek().span,
            ))
        }
    }

    /// Consume a token of the expected kind, or record the error and
    /// return a Missing placeholder anchored at the gap.
    ///
    /// ## Returns
    ///
    /// None if the token was present, Some(placeholder) otherwise.
    pub(super) fn expect_or_missing(&mut self, kind: TokenKind) -> Option<CstNode> {
        if self.match_token(kind) {
            return None;
        }

        let at = self.previous().span.end;
        let span = Span::new(at, at);
        self.errors.push(
            ParseError::missing_token(kind.display()).with_span(span),
        );
        Some(CstNode::missing(span, kind.display()))
    }

    /// Consume the current token if it matches.
    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Record a parse error.
    pub(super) fn record_error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    // =========================================================================
    // DEPTH TRACKING
    // =========================================================================

    /// Enter one nesting level, failing at [`MAX_PARSE_DEPTH`] so
    /// pathological input unwinds instead of overflowing the stack.
    /// Every `Ok` must be paired with an [`Self::exit_nested`].
    pub(super) fn enter_nested(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_PARSE_DEPTH {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep {
                    limit: MAX_PARSE_DEPTH,
                },
                self.peek().span,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave one nesting level.
    pub(super) fn exit_nested(&mut self) {
        self.depth -= 1;
    }

    // =========================================================================
    // ERROR RECOVERY
    // =========================================================================

    /// Skip tokens until a statement boundary.
    pub(super) fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }

            match self.peek_kind() {
                TokenKind::Module
                | TokenKind::Function
                | TokenKind::For
                | TokenKind::If
                | TokenKind::Let
                | TokenKind::Include
                | TokenKind::Use
                | TokenKind::RBrace => return,
                _ => {}
            }

            self.advance();
        }
    }

    /// Build an Error node covering everything consumed since `start`.
    fn error_node(&self, start: Position) -> CstNode {
        let end = self.previous().span.end;
        let span = Span::new(start, end);
        let text = self
            .source
            .get(start.byte..end.byte)
            .unwrap_or("")
            .to_string();
        CstNode::with_text(NodeKind::Error, span, text)
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    /// Span from `start` to the end of the previous token.
    pub(super) fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.previous().span.end)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(source: &str) -> Cst {
        let tokens = Lexer::new(source).tokenize();
        Parser::new(source, tokens).parse()
    }

    #[test]
    fn test_parse_empty() {
        let cst = parse("");
        assert!(cst.is_ok());
        assert_eq!(cst.root.kind, NodeKind::SourceFile);
        assert!(cst.root.children.is_empty());
    }

    #[test]
    fn test_parse_module_call() {
        let cst = parse("cube(10);");
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);
        assert_eq!(cst.root.children.len(), 1);
        assert_eq!(cst.root.children[0].kind, NodeKind::ModuleCall);
    }

    #[test]
    fn test_parse_multiple_statements() {
        let cst = parse("cube(10); sphere(5);");
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);
        assert_eq!(cst.root.children.len(), 2);
    }

    #[test]
    fn test_parse_stray_semicolons_skipped() {
        let cst = parse(";; cube(1); ;");
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);
        assert_eq!(cst.root.children.len(), 1);
    }

    #[test]
    fn test_parse_recovers_with_error_node() {
        let cst = parse("cube(; sphere(5);");
        assert!(!cst.errors.is_empty());

        // The malformed call becomes an Error node; the next statement
        // still parses.
        assert_eq!(cst.root.children.len(), 2);
        assert_eq!(cst.root.children[0].kind, NodeKind::Error);
        assert_eq!(cst.root.children[1].kind, NodeKind::ModuleCall);
    }

    #[test]
    fn test_parse_missing_semicolon_placeholder() {
        let cst = parse("x = 10");
        assert_eq!(cst.errors.len(), 1);
        assert_eq!(cst.errors[0].code(), "E003");

        let assign = &cst.root.children[0];
        assert_eq!(assign.kind, NodeKind::Assignment);
        assert!(assign.find_child(NodeKind::Missing).is_some());
    }

    #[test]
    fn test_deep_nesting_recovers_with_error() {
        // Far past the limit; must unwind cleanly, not blow the stack.
        let depth = MAX_PARSE_DEPTH * 20;
        let source = format!("x = {}1{};\ny = 2;", "(".repeat(depth), ")".repeat(depth));
        let cst = parse(&source);

        assert!(cst.errors.iter().any(|e| e.code() == "E007"));
        assert_eq!(cst.root.children[0].kind, NodeKind::Error);
        assert!(cst
            .root
            .children
            .iter()
            .any(|c| c.kind == NodeKind::Assignment && c.span.start.byte > depth));
    }

    #[test]
    fn test_nesting_under_the_limit_is_untouched() {
        let depth = MAX_PARSE_DEPTH / 2;
        let source = format!("x = {}1{};", "(".repeat(depth), ")".repeat(depth));
        let cst = parse(&source);
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);
        assert_eq!(cst.root.children[0].kind, NodeKind::Assignment);
    }

    #[test]
    fn test_error_node_carries_source_text() {
        let cst = parse("cube(;");
        assert_eq!(cst.root.children[0].kind, NodeKind::Error);
        assert_eq!(cst.root.children[0].text_or_empty(), "cube(;");
    }
}
