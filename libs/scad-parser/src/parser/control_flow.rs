//! # Control Flow Parsing
//!
//! For loops, if/else and let blocks.
//!
//! ## Grammar
//!
//! ```text
//! for_block  = "for" "(" for_assignments ")" statement
//! if_block   = "if" "(" expression ")" statement ("else" statement)?
//! let_block  = "let" "(" for_assignments ")" statement
//! for_assignments = for_assignment ("," for_assignment)*
//! for_assignment  = identifier "=" expression
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

impl<'a> Parser<'a> {
    /// Parse `for (i = [0:10], j = [0:5]) body`.
    pub(super) fn parse_for_block(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.advance(); // for

        self.expect(TokenKind::LParen)?;
        let assignments = self.parse_for_assignments()?;
        self.expect(TokenKind::RParen)?;

        let body = self.parse_statement()?;

        Ok(CstNode::with_children(
            NodeKind::ForBlock,
            self.span_from(start),
            vec![assignments, body],
        ))
    }

    /// Parse `if (cond) body` with an optional else branch.
    pub(super) fn parse_if_block(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.advance(); // if

        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;

        let mut children = vec![condition, self.parse_statement()?];
        if self.match_token(TokenKind::Else) {
            children.push(self.parse_statement()?);
        }

        Ok(CstNode::with_children(
            NodeKind::IfBlock,
            self.span_from(start),
            children,
        ))
    }

    /// Parse `let (x = 1, y = 2) body`.
    pub(super) fn parse_let_block(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.advance(); // let

        self.expect(TokenKind::LParen)?;
        let assignments = self.parse_for_assignments()?;
        self.expect(TokenKind::RParen)?;

        let body = self.parse_statement()?;

        Ok(CstNode::with_children(
            NodeKind::LetBlock,
            self.span_from(start),
            vec![assignments, body],
        ))
    }

    /// Parse a comma-separated assignment list, shared by `for`, `let`
    /// and list comprehensions.
    pub(super) fn parse_for_assignments(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        let mut children = vec![self.parse_for_assignment()?];

        while self.match_token(TokenKind::Comma) {
            children.push(self.parse_for_assignment()?);
        }

        Ok(CstNode::with_children(
            NodeKind::ForAssignments,
            self.span_from(start),
            children,
        ))
    }

    /// Parse a single `name = expression` binding.
    fn parse_for_assignment(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();

        let name = if self.check(TokenKind::SpecialVariable) {
            let token = self.advance().clone();
            CstNode::with_text(NodeKind::SpecialVariable, token.span, token.text)
        } else {
            let token = self.expect(TokenKind::Identifier)?.clone();
            CstNode::with_text(NodeKind::Identifier, token.span, token.text)
        };

        self.expect(TokenKind::Eq)?;
        let value = self.parse_expression()?;

        Ok(CstNode::with_children(
            NodeKind::ForAssignment,
            self.span_from(start),
            vec![name, value],
        ))
    }
}

// =============================================================================
// TESTS
// =============================================================================
