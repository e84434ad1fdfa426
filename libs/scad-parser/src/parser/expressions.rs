//! # Expression Parsing
//!
//! Facade for expression parsing. The pieces live in sibling modules:
//!
//! - `operators` - binary, unary and ternary operators with precedence
//! - `primaries` - literals, identifiers, parenthesized expressions
//! - `postfix` - calls, indexing, member access
//! - `collections` - lists, ranges, list comprehensions

use super::operators::Precedence;
use super::Parser;
use crate::cst::CstNode;
use crate::error::ParseError;

impl<'a> Parser<'a> {
    /// Parse an expression.
    pub(super) fn parse_expression(&mut self) -> Result<CstNode, ParseError> {
        self.parse_precedence(Precedence::Ternary)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::cst::NodeKind;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn parse_expr(source: &str) -> crate::cst::CstNode {
        let full = format!("x = {};", source);
        let tokens = Lexer::new(&full).tokenize();
        let cst = Parser::new(&full, tokens).parse();
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);
        cst.root.children[0].children[1].clone()
    }

    #[test]
    fn test_expression_dispatch() {
        assert_eq!(parse_expr("1 + 2 * 3").kind, NodeKind::BinaryExpression);
        assert_eq!(parse_expr("[1, 2]").kind, NodeKind::List);
        assert_eq!(parse_expr("sin(1)").kind, NodeKind::FunctionCall);
    }
}
