//! # Collection Parsing
//!
//! Lists, ranges and list comprehensions. All three share the `[`
//! opener; the token after it decides which one this is.
//!
//! ## Grammar
//!
//! ```text
//! list          = "[" (element ("," element)*)? "]"
//! element       = expression | "each" expression
//! range         = "[" expression ":" expression (":" expression)? "]"
//! comprehension = "[" "for" "(" for_assignments ")" expression "]"
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;
use crate::span::Position;

impl<'a> Parser<'a> {
    /// Parse a bracket expression: list, range or comprehension.
    pub(super) fn parse_bracket_expression(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.expect(TokenKind::LBracket)?;

        // Empty list
        if self.check(TokenKind::RBracket) {
            self.advance();
            return Ok(CstNode::with_children(
                NodeKind::List,
                self.span_from(start),
                vec![],
            ));
        }

        // List comprehension
        if self.check(TokenKind::For) {
            return self.parse_list_comprehension(start);
        }

        // `each` element starts a plain list
        if self.check(TokenKind::Each) {
            let first = self.parse_list_element()?;
            return self.parse_list(start, first);
        }

        let first = self.parse_expression()?;

        if self.check(TokenKind::Colon) {
            return self.parse_range(start, first);
        }

        self.parse_list(start, first)
    }

    /// Parse the rest of a list after its first element.
    fn parse_list(&mut self, start: Position, first: CstNode) -> Result<CstNode, ParseError> {
        let mut elements = vec![first];

        while self.match_token(TokenKind::Comma) {
            // Allow trailing comma
            if self.check(TokenKind::RBracket) {
                break;
            }
            elements.push(self.parse_list_element()?);
        }

        self.expect(TokenKind::RBracket)?;
        Ok(CstNode::with_children(
            NodeKind::List,
            self.span_from(start),
            elements,
        ))
    }

    /// Parse a list element, which may be prefixed with `each`.
    fn parse_list_element(&mut self) -> Result<CstNode, ParseError> {
        if self.check(TokenKind::Each) {
            let start = self.current_position();
            self.advance();
            let inner = self.parse_expression()?;
            // `each` flattens its operand; keep it as a one-child
            // comprehension node so lowering can tell it apart.
            return Ok(CstNode::with_children(
                NodeKind::ListComprehension,
                self.span_from(start),
                vec![inner],
            ));
        }
        self.parse_expression()
    }

    /// Parse the rest of a range after its first expression.
    fn parse_range(&mut self, start: Position, first: CstNode) -> Result<CstNode, ParseError> {
        self.expect(TokenKind::Colon)?;
        let second = self.parse_expression()?;

        let children = if self.check(TokenKind::Colon) {
            self.advance();
            let third = self.parse_expression()?;
            // [start : step : end]
            vec![first, second, third]
        } else {
            // [start : end]
            vec![first, second]
        };

        self.expect(TokenKind::RBracket)?;
        Ok(CstNode::with_children(
            NodeKind::Range,
            self.span_from(start),
            children,
        ))
    }

    /// Parse `[for (bindings) element]`.
    fn parse_list_comprehension(&mut self, start: Position) -> Result<CstNode, ParseError> {
        self.advance(); // for

        self.expect(TokenKind::LParen)?;
        let assignments = self.parse_for_assignments()?;
        self.expect(TokenKind::RParen)?;

        let element = self.parse_list_element()?;
        self.expect(TokenKind::RBracket)?;

        Ok(CstNode::with_children(
            NodeKind::ListComprehension,
            self.span_from(start),
            vec![assignments, element],
        ))
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
    fn test_parse_empty_list() {
        let expr = parse_expr("[]");
        assert_eq!(expr.kind, NodeKind::List);
        assert!(expr.children.is_empty());
    }

    #[test]
    fn test_parse_list() {
        let expr = parse_expr("[1, 2, 3]");
        assert_eq!(expr.kind, NodeKind::List);
        assert_eq!(expr.children.len(), 3);
    }

    #[test]
    fn test_parse_list_trailing_comma() {
        let expr = parse_expr("[1, 2,]");
        assert_eq!(expr.children.len(), 2);
    }

    #[test]
    fn test_parse_nested_list() {
        let expr = parse_expr("[[1, 2], [3, 4]]");
        assert_eq!(expr.kind, NodeKind::List);
        assert_eq!(expr.children[0].kind, NodeKind::List);
    }

    #[test]
    fn test_parse_simple_range() {
        let expr = parse_expr("[0:10]");
        assert_eq!(expr.kind, NodeKind::Range);
        assert_eq!(expr.children.len(), 2);
    }

    #[test]
    fn test_parse_stepped_range() {
        let expr = parse_expr("[0:2:10]");
        assert_eq!(expr.kind, NodeKind::Range);
        assert_eq!(expr.children.len(), 3);
    }

    #[test]
    fn test_parse_range_with_expression_bounds() {
        let expr = parse_expr("[a+1:b*2:c]");
        assert_eq!(expr.kind, NodeKind::Range);
        assert_eq!(expr.children.len(), 3);
        assert_eq!(expr.children[0].kind, NodeKind::BinaryExpression);
        assert_eq!(expr.children[1].kind, NodeKind::BinaryExpression);
        assert_eq!(expr.children[2].kind, NodeKind::Identifier);
    }

    #[test]
    fn test_parse_list_comprehension() {
        let expr = parse_expr("[for (i = [0:10]) i * 2]");
        assert_eq!(expr.kind, NodeKind::ListComprehension);
        assert_eq!(expr.children[0].kind, NodeKind::ForAssignments);
        assert_eq!(expr.children[1].kind, NodeKind::BinaryExpression);
    }

    #[test]
    fn test_parse_each_element() {
        let expr = parse_expr("[each [1, 2], 3]");
        assert_eq!(expr.kind, NodeKind::List);
        assert_eq!(expr.children[0].kind, NodeKind::ListComprehension);
        assert_eq!(expr.children[1].kind, NodeKind::Number);
    }
}
