//! # Postfix Expression Parsing
//!
//! Function calls, index access and member access.

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parse a postfix chain.
    ///
    /// ## Grammar
    ///
    /// ```text
    /// postfix = primary ("(" args ")" | "[" expr "]" | "." identifier)*
    /// ```
    pub(super) fn parse_postfix(&mut self) -> Result<CstNode, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.peek_kind() {
                TokenKind::LParen => {
                    expr = self.parse_function_call(expr)?;
                }
                TokenKind::LBracket => {
                    expr = self.parse_index_access(expr)?;
                }
                TokenKind::Dot => {
                    expr = self.parse_member_access(expr)?;
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    /// Parse `callee(args)`.
    fn parse_function_call(&mut self, callee: CstNode) -> Result<CstNode, ParseError> {
        let start = callee.span.start;
        self.advance(); // (
        let args = self.parse_arguments()?;
        self.expect(TokenKind::RParen)?;

        Ok(CstNode::with_children(
            NodeKind::FunctionCall,
            self.span_from(start),
            vec![callee, args],
        ))
    }

    /// Parse `object[index]`.
    fn parse_index_access(&mut self, object: CstNode) -> Result<CstNode, ParseError> {
        let start = object.span.start;
        self.advance(); // [
        let index = self.parse_expression()?;
        self.expect(TokenKind::RBracket)?;

        Ok(CstNode::with_children(
            NodeKind::IndexExpression,
            self.span_from(start),
            vec![object, index],
        ))
    }

    /// Parse `object.name`.
    fn parse_member_access(&mut self, object: CstNode) -> Result<CstNode, ParseError> {
        let start = object.span.start;
        self.advance(); // .
        let name = self.expect(TokenKind::Identifier)?.clone();

        Ok(CstNode::with_children(
            NodeKind::DotExpression,
            self.span_from(start),
            vec![
                object,
                CstNode::with_text(NodeKind::Identifier, name.span, name.text),
            ],
        ))
    }
}

// =============================================================================
// TESTS
// =============================================================================
