//! # Concrete Syntax Tree (CST)
//!
//! CST types for parsed source code. Every node carries its span so the
//! tree can be mapped back onto the editor buffer, and malformed regions
//! are represented in-tree with [`NodeKind::Error`] and
//! [`NodeKind::Missing`] nodes instead of being dropped.
//!
//! ## Example
//!
//! ```rust
//! use scad_parser::cst::NodeKind;
//!
//! let cst = scad_parser::parse("cube(10);");
//! assert_eq!(cst.root.kind, NodeKind::SourceFile);
//! assert!(cst.is_ok());
//! ```

use crate::error::ParseError;
use crate::span::{Span, Spanned};
use serde::{Deserialize, Serialize};

// =============================================================================
// CST
// =============================================================================

/// Parse result: the root node plus the errors encountered.
///
/// The root is always present; a source with errors still yields a tree
/// covering the well-formed parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cst {
    /// Root node of the syntax tree.
    pub root: CstNode,
    /// Parse errors encountered.
    pub errors: Vec<ParseError>,
}

impl Cst {
    /// Create a new CST.
    pub fn new(root: CstNode, errors: Vec<ParseError>) -> Self {
        Self { root, errors }
    }

    /// Check if parsing produced no errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

// =============================================================================
// CST NODE
// =============================================================================

/// A node in the Concrete Syntax Tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CstNode {
    /// Node type.
    pub kind: NodeKind,
    /// Source span.
    pub span: Span,
    /// Child nodes.
    pub children: Vec<CstNode>,
    /// Text content (for terminals like identifiers and numbers).
    pub text: Option<String>,
}

impl CstNode {
    /// Create a new node without children or text.
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
            text: None,
        }
    }

    /// Create a terminal node with text content.
    pub fn with_text(kind: NodeKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
            text: Some(text.into()),
        }
    }

    /// Create an interior node with children.
    pub fn with_children(kind: NodeKind, span: Span, children: Vec<CstNode>) -> Self {
        Self {
            kind,
            span,
            children,
            text: None,
        }
    }

    /// Create a placeholder for a token the parser expected but did not
    /// find. The span is empty, anchored where the token should be.
    pub fn missing(span: Span, expected: impl Into<String>) -> Self {
        Self::with_text(NodeKind::Missing, span, expected)
    }

    /// Add a child node.
    pub fn add_child(&mut self, child: CstNode) {
        self.children.push(child);
    }

    /// Get text content, or empty string if none.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Find the first child with the given kind.
    pub fn find_child(&self, kind: NodeKind) -> Option<&CstNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Find all children with the given kind.
    pub fn find_children(&self, kind: NodeKind) -> Vec<&CstNode> {
        self.children.iter().filter(|c| c.kind == kind).collect()
    }

    /// Check if this node or any descendant is an error or missing node.
    pub fn has_error(&self) -> bool {
        self.kind == NodeKind::Error
            || self.kind == NodeKind::Missing
            || self.children.iter().any(CstNode::has_error)
    }

    /// Find the deepest node whose span contains the byte offset.
    pub fn node_at(&self, byte: usize) -> Option<&CstNode> {
        if !self.span.contains(byte) {
            return None;
        }
        self.children
            .iter()
            .find_map(|c| c.node_at(byte))
            .or(Some(self))
    }

    /// Visit this node and all descendants in depth-first order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a CstNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

impl Spanned for CstNode {
    fn span(&self) -> Span {
        self.span
    }
}

// =============================================================================
// NODE KIND
// =============================================================================

/// Types of CST nodes.
///
/// The set is closed: downstream stages dispatch on it with exhaustive
/// matches, so adding a variant is a deliberate grammar change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    // Top-level
    /// Root node containing all statements.
    SourceFile,

    // Statements
    /// Module call like `cube(10);`, possibly with a child block.
    ModuleCall,
    /// Variable assignment like `x = 10;`
    Assignment,
    /// Module definition like `module foo() { ... }`
    ModuleDeclaration,
    /// Function definition like `function foo() = ...;`
    FunctionDeclaration,
    /// For loop like `for (i = [0:10]) { ... }`
    ForBlock,
    /// For loop assignment list like `i = [0:10], j = [0:5]`
    ForAssignments,
    /// Single for assignment like `i = [0:10]`
    ForAssignment,
    /// If statement like `if (x > 0) { ... }`
    IfBlock,
    /// Let block like `let (x = 1) { ... }`
    LetBlock,
    /// Include statement
    IncludeStatement,
    /// Use statement
    UseStatement,

    // Expressions
    /// Binary operation like `a + b`
    BinaryExpression,
    /// Unary operation like `-x` or `!x`
    UnaryExpression,
    /// Ternary operation like `a ? b : c`
    TernaryExpression,
    /// Function call like `sin(x)`
    FunctionCall,
    /// Index access like `arr[0]`
    IndexExpression,
    /// Dot access like `v.x`
    DotExpression,
    /// List comprehension like `[for (i = [0:10]) i]`
    ListComprehension,
    /// Range like `[0:10]` or `[0:2:10]`
    Range,
    /// List literal like `[1, 2, 3]`
    List,

    // Terminals
    /// Identifier like `cube` or `size`
    Identifier,
    /// Special variable like `$fn`
    SpecialVariable,
    /// Number literal like `10` or `3.14`
    Number,
    /// String literal like `"hello"`
    String,
    /// Boolean literal `true` or `false`
    Boolean,
    /// Undef literal
    Undef,
    /// Operator terminal inside binary/unary expressions, like `+`
    Operator,

    // Arguments
    /// Argument list `(10, center=true)`
    Arguments,
    /// Single positional argument
    Argument,
    /// Named argument `center=true`
    NamedArgument,

    // Parameters
    /// Parameter list `(x, y=0)`
    Parameters,
    /// Single parameter, possibly with a default value
    Parameter,

    // Other
    /// Modifier like `!`, `#`, `%`, `*` before a module call
    Modifier,
    /// Block of statements `{ ... }`
    Block,

    // Recovery
    /// Subtree the parser could not make sense of.
    Error,
    /// Placeholder for an expected-but-absent token.
    Missing,
}

impl NodeKind {
    /// Check if this is an expression node.
    pub const fn is_expression(&self) -> bool {
        matches!(
            self,
            Self::BinaryExpression
                | Self::UnaryExpression
                | Self::TernaryExpression
                | Self::FunctionCall
                | Self::IndexExpression
                | Self::DotExpression
                | Self::ListComprehension
                | Self::Range
                | Self::List
                | Self::Identifier
                | Self::SpecialVariable
                | Self::Number
                | Self::String
                | Self::Boolean
                | Self::Undef
        )
    }

    /// Check if this is a statement node.
    pub const fn is_statement(&self) -> bool {
        matches!(
            self,
            Self::ModuleCall
                | Self::Assignment
                | Self::ModuleDeclaration
                | Self::FunctionDeclaration
                | Self::ForBlock
                | Self::IfBlock
                | Self::LetBlock
                | Self::IncludeStatement
                | Self::UseStatement
                | Self::Block
        )
    }

    /// Check if this is a literal node.
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Number | Self::String | Self::Boolean | Self::Undef)
    }
}

// =============================================================================
// TESTS
// =============================================================================
