//! # Expression Nodes
//!
//! Typed expression tree lowered from CST expression subtrees. Every
//! expression owns its children; there are no parent back-references,
//! so the tree is acyclic by construction.

use crate::location::SourceLocation;
use serde::{Deserialize, Serialize};

// =============================================================================
// EXPRESSION
// =============================================================================

/// An expression with its source location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    /// Expression variant.
    pub kind: ExprKind,
    /// Location in the current source text.
    pub location: SourceLocation,
}

impl Expr {
    /// Create an expression.
    pub fn new(kind: ExprKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    /// Shorthand for a number literal.
    pub fn number(value: f64, location: SourceLocation) -> Self {
        Self::new(ExprKind::Number(value), location)
    }

    /// Shorthand for an identifier.
    pub fn identifier(name: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(ExprKind::Identifier(name.into()), location)
    }

    /// The literal number value, if this is a number literal.
    pub fn as_number(&self) -> Option<f64> {
        match self.kind {
            ExprKind::Number(n) => Some(n),
            _ => None,
        }
    }
}

/// A single `name = value` binding in `for`, `let` and list
/// comprehensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    /// Bound name.
    pub name: String,
    /// Location of just the name identifier, for rename.
    pub name_location: SourceLocation,
    /// Bound value expression.
    pub value: Expr,
}

/// Expression variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    /// Number literal like `3.14`.
    Number(f64),
    /// String literal, quotes stripped.
    String(String),
    /// Boolean literal.
    Boolean(bool),
    /// The `undef` literal.
    Undef,
    /// Identifier reference like `size`.
    Identifier(String),
    /// Special variable reference like `$fn`.
    SpecialVariable(String),
    /// Unary operation like `-x`.
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// Binary operation like `a + b`.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Ternary conditional `cond ? a : b`.
    Ternary {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    /// Range `[start:end]` or `[start:step:end]`.
    Range {
        start: Box<Expr>,
        step: Option<Box<Expr>>,
        end: Box<Expr>,
    },
    /// List literal `[1, 2, 3]`.
    List(Vec<Expr>),
    /// Function call like `sin(x)`.
    FunctionCall { name: String, arguments: Vec<Expr> },
    /// Index access `arr[i]`.
    Index { object: Box<Expr>, index: Box<Expr> },
    /// Member access `v.x`.
    Member { object: Box<Expr>, field: String },
    /// List comprehension `[for (i = range) element]`.
    ListComprehension {
        bindings: Vec<Binding>,
        element: Box<Expr>,
    },
    /// `each` spread of its operand into the surrounding list.
    Each(Box<Expr>),
    /// Subtree that could not be lowered; carries the raw text.
    Error(String),
}

// =============================================================================
// OPERATORS
// =============================================================================

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
}

impl BinaryOp {
    /// Parse an operator from its source text.
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            "%" => Some(Self::Mod),
            "^" => Some(Self::Pow),
            "==" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            "<" => Some(Self::Lt),
            ">" => Some(Self::Gt),
            "<=" => Some(Self::Le),
            ">=" => Some(Self::Ge),
            "&&" => Some(Self::And),
            "||" => Some(Self::Or),
            _ => None,
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
}

impl UnaryOp {
    /// Parse an operator from its source text.
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "-" => Some(Self::Neg),
            "+" => Some(Self::Pos),
            "!" => Some(Self::Not),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_op_from_text() {
        assert_eq!(BinaryOp::from_text("+"), Some(BinaryOp::Add));
        assert_eq!(BinaryOp::from_text("<="), Some(BinaryOp::Le));
        assert_eq!(BinaryOp::from_text("=>"), None);
    }

    #[test]
    fn test_unary_op_from_text() {
        assert_eq!(UnaryOp::from_text("!"), Some(UnaryOp::Not));
        assert_eq!(UnaryOp::from_text("~"), None);
    }

    #[test]
    fn test_as_number() {
        let loc = SourceLocation::zero();
        assert_eq!(Expr::number(4.0, loc).as_number(), Some(4.0));
        assert_eq!(Expr::identifier("x", loc).as_number(), None);
    }
}
