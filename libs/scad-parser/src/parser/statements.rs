//! # Statement Parsing
//!
//! Module calls, assignments, blocks, argument lists and modifiers.
//!
//! ## Grammar
//!
//! ```text
//! statement   = module_call | assignment | declaration | control_flow | block
//! module_call = identifier "(" arguments? ")" (";" | block | statement)
//! assignment  = identifier "=" expression ";"
//! ```

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use crate::span::Position;

impl<'a> Parser<'a> {
    /// Parse a single statement. Depth-limited so deeply nested blocks
    /// and call bodies unwind instead of overflowing the stack.
    pub(super) fn parse_statement(&mut self) -> Result<CstNode, ParseError> {
        self.enter_nested()?;
        let result = self.parse_statement_inner();
        self.exit_nested();
        result
    }

    fn parse_statement_inner(&mut self) -> Result<CstNode, ParseError> {
        let modifier = self.parse_modifier();

        let stmt = match self.peek_kind() {
            TokenKind::Module => self.parse_module_declaration(),
            TokenKind::Function => self.parse_function_declaration(),

            TokenKind::For => self.parse_for_block(),
            TokenKind::If => self.parse_if_block(),
            TokenKind::Let => self.parse_let_block(),

            TokenKind::Include => self.parse_path_statement(NodeKind::IncludeStatement),
            TokenKind::Use => self.parse_path_statement(NodeKind::UseStatement),

            TokenKind::LBrace => self.parse_block(),

            TokenKind::Identifier | TokenKind::SpecialVariable => {
                self.parse_identifier_statement()
            }

            _ => {
                let token = self.peek().clone();
                Err(ParseError::unexpected_token(&token.text, "statement").with_span(token.span))
            }
        }?;

        if let Some(mod_node) = modifier {
            let span = mod_node.span.merge(&stmt.span);
            Ok(CstNode::with_children(
                NodeKind::Modifier,
                span,
                vec![mod_node, stmt],
            ))
        } else {
            Ok(stmt)
        }
    }

    /// Parse an optional statement modifier (`!`, `#`, `%`, `*`).
    fn parse_modifier(&mut self) -> Option<CstNode> {
        match self.peek_kind() {
            TokenKind::Star | TokenKind::Bang | TokenKind::Hash | TokenKind::Percent => {
                let start = self.current_position();
                let text = self.peek().text.clone();
                self.advance();
                Some(CstNode::with_text(NodeKind::Modifier, self.span_from(start), text))
            }
            _ => None,
        }
    }

    /// Parse a statement starting with an identifier: either an
    /// assignment `x = 10;` or a module call `cube(10);`.
    fn parse_identifier_statement(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        let name = self.advance().clone();

        if self.check(TokenKind::Eq) {
            return self.parse_assignment(start, name);
        }

        self.parse_module_call(start, name)
    }

    /// Parse a module call. The body is a semicolon, a block, or a
    /// single child statement (transform style).
    fn parse_module_call(&mut self, start: Position, name: Token) -> Result<CstNode, ParseError> {
        let name_kind = if name.kind == TokenKind::SpecialVariable {
            NodeKind::SpecialVariable
        } else {
            NodeKind::Identifier
        };
        let mut children = vec![CstNode::with_text(name_kind, name.span, name.text)];

        self.expect(TokenKind::LParen)?;
        children.push(self.parse_arguments()?);
        self.expect(TokenKind::RParen)?;

        if self.check(TokenKind::Semicolon) {
            self.advance();
        } else if self.check(TokenKind::LBrace) {
            children.push(self.parse_block()?);
        } else if !self.is_at_end() {
            children.push(self.parse_statement()?);
        } else if let Some(missing) = self.expect_or_missing(TokenKind::Semicolon) {
            children.push(missing);
        }

        Ok(CstNode::with_children(
            NodeKind::ModuleCall,
            self.span_from(start),
            children,
        ))
    }

    /// Parse an assignment. A dropped trailing semicolon is recorded
    /// as a Missing child instead of failing the statement.
    fn parse_assignment(&mut self, start: Position, name: Token) -> Result<CstNode, ParseError> {
        let name_kind = if name.kind == TokenKind::SpecialVariable {
            NodeKind::SpecialVariable
        } else {
            NodeKind::Identifier
        };
        let mut children = vec![CstNode::with_text(name_kind, name.span, name.text)];

        self.expect(TokenKind::Eq)?;
        children.push(self.parse_expression()?);

        if let Some(missing) = self.expect_or_missing(TokenKind::Semicolon) {
            children.push(missing);
        }

        Ok(CstNode::with_children(
            NodeKind::Assignment,
            self.span_from(start),
            children,
        ))
    }

    /// Parse an argument list (inside already-consumed parentheses).
    pub(super) fn parse_arguments(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        let mut children = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(CstNode::with_children(
                NodeKind::Arguments,
                self.span_from(start),
                children,
            ));
        }

        children.push(self.parse_argument()?);
        while self.match_token(TokenKind::Comma) {
            if self.check(TokenKind::RParen) {
                break;
            }
            children.push(self.parse_argument()?);
        }

        Ok(CstNode::with_children(
            NodeKind::Arguments,
            self.span_from(start),
            children,
        ))
    }

    /// Parse a single positional or named argument.
    fn parse_argument(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();

        let named = (self.check(TokenKind::Identifier) || self.check(TokenKind::SpecialVariable))
            && self.check_next(TokenKind::Eq);
        if named {
            let name = self.advance().clone();
            let name_kind = if name.kind == TokenKind::SpecialVariable {
                NodeKind::SpecialVariable
            } else {
                NodeKind::Identifier
            };
            self.expect(TokenKind::Eq)?;
            let value = self.parse_expression()?;

            return Ok(CstNode::with_children(
                NodeKind::NamedArgument,
                self.span_from(start),
                vec![CstNode::with_text(name_kind, name.span, name.text), value],
            ));
        }

        let expr = self.parse_expression()?;
        Ok(CstNode::with_children(
            NodeKind::Argument,
            self.span_from(start),
            vec![expr],
        ))
    }

    /// Parse a `{ ... }` block.
    pub(super) fn parse_block(&mut self) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.expect(TokenKind::LBrace)?;

        let mut children = self.parse_statement_list(Some(TokenKind::RBrace));

        if let Some(missing) = self.expect_or_missing(TokenKind::RBrace) {
            children.push(missing);
        }

        Ok(CstNode::with_children(
            NodeKind::Block,
            self.span_from(start),
            children,
        ))
    }

    /// Parse `include <path>;` or `use <path>;`.
    ///
    /// The path text between `<` and `>` (or a string literal) is kept
    /// as a String child.
    fn parse_path_statement(&mut self, kind: NodeKind) -> Result<CstNode, ParseError> {
        let start = self.current_position();
        self.advance(); // include / use

        let mut children = Vec::new();
        if self.check(TokenKind::String) {
            let path = self.advance().clone();
            children.push(CstNode::with_text(NodeKind::String, path.span, path.text));
            if let Some(missing) = self.expect_or_missing(TokenKind::Semicolon) {
                children.push(missing);
            }
        } else if self.check(TokenKind::Lt) {
            self.advance();
            let path_start = self.current_position();
            while !self.check(TokenKind::Gt) && !self.is_at_end() {
                self.advance();
            }
            let path_span = self.span_from(path_start);
            children.push(CstNode::with_text(
                NodeKind::String,
                path_span,
                self.source
                    .get(path_span.start.byte..path_span.end.byte)
                    .unwrap_or(""),
            ));
            self.expect(TokenKind::Gt)?;
            if let Some(missing) = self.expect_or_missing(TokenKind::Semicolon) {
                children.push(missing);
            }
        } else {
            let token = self.peek().clone();
            return Err(
                ParseError::unexpected_token(&token.text, "file path").with_span(token.span)
            );
        }

        Ok(CstNode::with_children(kind, self.span_from(start), children))
    }
}

// =============================================================================
// TESTS
// =============================================================================
