//! # Operator Parsing
//!
//! Binary, unary and ternary operators via precedence climbing.
//!
//! ## Operator Precedence
//!
//! | Precedence | Operators | Associativity |
//! |------------|-----------|---------------|
//! | 1 | ?: (ternary) | Right |
//! | 2 | \|\| | Left |
//! | 3 | && | Left |
//! | 4 | == != | Left |
//! | 5 | < > <= >= | Left |
//! | 6 | + - | Left |
//! | 7 | * / % | Left |
//! | 8 | ^ | Right |
//! | 9 | ! - + (unary) | Right |

use super::Parser;
use crate::cst::{CstNode, NodeKind};
use crate::error::ParseError;
use crate::lexer::TokenKind;

// =============================================================================
// PRECEDENCE
// =============================================================================

/// Operator precedence levels. Higher values bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Precedence {
    /// Sentinel.
    None = 0,
    /// Ternary: `?:`
    Ternary = 1,
    /// Logical or: `||`
    Or = 2,
    /// Logical and: `&&`
    And = 3,
    /// Equality: `== !=`
    Equality = 4,
    /// Comparison: `< > <= >=`
    Comparison = 5,
    /// Addition/subtraction: `+ -`
    Term = 6,
    /// Multiplication/division: `* / %`
    Factor = 7,
    /// Power: `^`
    Power = 8,
    /// Unary: `! - +`
    Unary = 9,
    /// Call/access: `() [] .`
    Call = 10,
}

impl Precedence {
    /// Precedence of a binary operator token, if it is one.
    pub(super) fn of_binary(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Question => Some(Self::Ternary),
            TokenKind::PipePipe => Some(Self::Or),
            TokenKind::AmpAmp => Some(Self::And),
            TokenKind::EqEq | TokenKind::BangEq => Some(Self::Equality),
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => {
                Some(Self::Comparison)
            }
            TokenKind::Plus | TokenKind::Minus => Some(Self::Term),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(Self::Factor),
            TokenKind::Caret => Some(Self::Power),
            _ => None,
        }
    }

    /// Next higher precedence level, for left-associative operators.
    pub(super) fn next(&self) -> Self {
        match self {
            Self::None => Self::Ternary,
            Self::Ternary => Self::Or,
            Self::Or => Self::And,
            Self::And => Self::Equality,
            Self::Equality => Self::Comparison,
            Self::Comparison => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Power,
            Self::Power => Self::Unary,
            Self::Unary => Self::Call,
            Self::Call => Self::Call,
        }
    }
}

// =============================================================================
// OPERATOR PARSING
// =============================================================================

impl<'a> Parser<'a> {
    /// Parse an expression with a minimum precedence.
    pub(super) fn parse_precedence(&mut self, min_prec: Precedence) -> Result<CstNode, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(prec) = Precedence::of_binary(self.peek_kind()) {
            if prec < min_prec {
                break;
            }

            if self.peek_kind() == TokenKind::Question {
                left = self.parse_ternary(left)?;
                continue;
            }

            left = self.parse_binary_op(left, prec)?;
        }

        Ok(left)
    }

    /// Parse one binary operator application.
    fn parse_binary_op(&mut self, left: CstNode, prec: Precedence) -> Result<CstNode, ParseError> {
        let start = left.span.start;
        let op = self.advance().clone();

        // `^` is right-associative.
        let next_prec = if op.kind == TokenKind::Caret {
            prec
        } else {
            prec.next()
        };

        let right = self.parse_precedence(next_prec)?;

        Ok(CstNode::with_children(
            NodeKind::BinaryExpression,
            self.span_from(start),
            vec![
                left,
                CstNode::with_text(NodeKind::Operator, op.span, op.text),
                right,
            ],
        ))
    }

    /// Parse `cond ? then : else`.
    fn parse_ternary(&mut self, condition: CstNode) -> Result<CstNode, ParseError> {
        let start = condition.span.start;

        self.expect(TokenKind::Question)?;
        let then_expr = self.parse_expression()?;
        self.expect(TokenKind::Colon)?;
        let else_expr = self.parse_expression()?;

        Ok(CstNode::with_children(
            NodeKind::TernaryExpression,
            self.span_from(start),
            vec![condition, then_expr, else_expr],
        ))
    }

    /// Parse a prefix expression: `!x`, `-x`, `+x` or a postfix chain.
    ///
    /// Every recursive expression path passes through here, so this is
    /// where the nesting depth limit is enforced.
    pub(super) fn parse_unary(&mut self) -> Result<CstNode, ParseError> {
        self.enter_nested()?;
        let result = self.parse_unary_inner();
        self.exit_nested();
        result
    }

    fn parse_unary_inner(&mut self) -> Result<CstNode, ParseError> {
        if matches!(
            self.peek_kind(),
            TokenKind::Bang | TokenKind::Minus | TokenKind::Plus
        ) {
            let start = self.current_position();
            let op = self.advance().clone();
            let operand = self.parse_unary()?;

            return Ok(CstNode::with_children(
                NodeKind::UnaryExpression,
                self.span_from(start),
                vec![
                    CstNode::with_text(NodeKind::Operator, op.span, op.text),
                    operand,
                ],
            ));
        }

        self.parse_postfix()
    }
}

// =============================================================================
// TESTS
// =============================================================================
