//! # AST Nodes
//!
//! Strongly-typed AST derived from the CST. Each variant carries its
//! [`SourceLocation`] and owns its children where geometry nesting
//! applies; there are no parent back-references.
//!
//! ## Example
//!
//! ```rust
//! use scad_ast::ast::{AstNode, CubeSize};
//! use scad_ast::location::SourceLocation;
//!
//! let cube = AstNode::Cube {
//!     size: Some(CubeSize::Scalar(10.0)),
//!     center: None,
//!     parameters: vec![],
//!     location: SourceLocation::zero(),
//! };
//! assert_eq!(cube.type_name(), "cube");
//! ```

use crate::expr::{Binding, Expr};
use crate::location::SourceLocation;
use serde::{Deserialize, Serialize};

// =============================================================================
// PARAMETERS
// =============================================================================

/// One extracted call argument, order-preserving.
///
/// `name` is absent for positional arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Argument name, or None for positional arguments.
    pub name: Option<String>,
    /// Extracted value.
    pub value: ParamValue,
}

impl Parameter {
    /// Create a positional parameter.
    pub fn positional(value: ParamValue) -> Self {
        Self { name: None, value }
    }

    /// Create a named parameter.
    pub fn named(name: impl Into<String>, value: ParamValue) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }
}

/// An argument value after extraction.
///
/// Literals extract to native values; anything else stays an
/// unevaluated expression for the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    /// Numeric literal.
    Number(f64),
    /// Boolean literal.
    Boolean(bool),
    /// String literal, quotes stripped.
    String(String),
    /// Flat numeric vector literal like `[10, 20, 30]`.
    Vector(Vec<f64>),
    /// Unevaluated expression.
    Expr(Expr),
}

impl ParamValue {
    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean value, if this is a boolean.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The vector value, if this is a vector.
    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Self::Vector(v) => Some(v),
            _ => None,
        }
    }
}

/// A declared parameter of a module or function definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDecl {
    /// Parameter name (without `$` for special variables).
    pub name: String,
    /// True for `$`-prefixed parameters.
    pub special: bool,
    /// Default value expression, if declared.
    pub default: Option<Expr>,
    /// Location of the parameter name.
    pub location: SourceLocation,
}

// =============================================================================
// SIZES
// =============================================================================

/// Size argument of `cube` and `square`: scalar or vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CubeSize {
    /// Scalar size applied to every axis.
    Scalar(f64),
    /// Per-axis sizes.
    Vector(Vec<f64>),
}

impl CubeSize {
    /// Expand to per-axis values, replicating scalars.
    pub fn to_vec3(&self) -> [f64; 3] {
        match self {
            Self::Scalar(s) => [*s, *s, *s],
            Self::Vector(v) => [
                v.first().copied().unwrap_or(0.0),
                v.get(1).copied().unwrap_or(0.0),
                v.get(2).copied().unwrap_or(0.0),
            ],
        }
    }
}

// =============================================================================
// KIND GROUPS
// =============================================================================

/// Transform operations sharing the argument+children shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformKind {
    Translate,
    Rotate,
    Scale,
    Mirror,
    Color,
    Offset,
}

impl TransformKind {
    /// The call name for this transform.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Rotate => "rotate",
            Self::Scale => "scale",
            Self::Mirror => "mirror",
            Self::Color => "color",
            Self::Offset => "offset",
        }
    }
}

/// Boolean operations over child geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BooleanKind {
    Union,
    Difference,
    Intersection,
    Hull,
    Minkowski,
}

impl BooleanKind {
    /// The call name for this operation.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::Difference => "difference",
            Self::Intersection => "intersection",
            Self::Hull => "hull",
            Self::Minkowski => "minkowski",
        }
    }
}

// =============================================================================
// AST NODE
// =============================================================================

/// A node in the abstract syntax tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AstNode {
    /// `cube(size, center)`. `size` is None when the argument is
    /// absent or non-literal; `parameters` keeps the raw arguments,
    /// expressions included.
    Cube {
        size: Option<CubeSize>,
        center: Option<bool>,
        parameters: Vec<Parameter>,
        location: SourceLocation,
    },

    /// `sphere(r|d, $fn/$fa/$fs)`. `r` is derived from `d` when only
    /// the diameter is given.
    Sphere {
        r: Option<f64>,
        fn_: Option<f64>,
        fa: Option<f64>,
        fs: Option<f64>,
        parameters: Vec<Parameter>,
        location: SourceLocation,
    },

    /// `cylinder(h, r|r1/r2|d/d1/d2, center)`.
    ///
    /// Derived fields: diameters halve into radii, a lone `r` fills
    /// `r1` and `r2`. A missing `h` stays None and is reported as a
    /// missing required parameter, never synthesized. Non-literal
    /// arguments leave their typed field None but survive in
    /// `parameters`.
    Cylinder {
        h: Option<f64>,
        r1: Option<f64>,
        r2: Option<f64>,
        center: Option<bool>,
        fn_: Option<f64>,
        parameters: Vec<Parameter>,
        location: SourceLocation,
    },

    /// `circle(r|d)`.
    Circle {
        r: Option<f64>,
        fn_: Option<f64>,
        parameters: Vec<Parameter>,
        location: SourceLocation,
    },

    /// `square(size, center)`.
    Square {
        size: Option<CubeSize>,
        center: Option<bool>,
        parameters: Vec<Parameter>,
        location: SourceLocation,
    },

    /// `polygon(points, paths)`. Points stay expressions; nested
    /// vectors are not flattened here.
    Polygon {
        points: Option<Expr>,
        paths: Option<Expr>,
        location: SourceLocation,
    },

    /// Transform call with child geometry.
    Transform {
        kind: TransformKind,
        argument: Option<ParamValue>,
        children: Vec<AstNode>,
        location: SourceLocation,
    },

    /// Boolean operation over child geometry.
    BooleanOp {
        op: BooleanKind,
        children: Vec<AstNode>,
        location: SourceLocation,
    },

    /// `module name(params) body`.
    ModuleDefinition {
        name: String,
        params: Vec<ParamDecl>,
        body: Vec<AstNode>,
        location: SourceLocation,
        /// Location of just the name identifier, for rename.
        name_location: SourceLocation,
    },

    /// `function name(params) = expr;`.
    FunctionDefinition {
        name: String,
        params: Vec<ParamDecl>,
        body: Expr,
        location: SourceLocation,
        /// Location of just the name identifier, for rename.
        name_location: SourceLocation,
    },

    /// `name = expr;`.
    Assignment {
        name: String,
        /// True for `$`-prefixed special variables.
        special: bool,
        value: Expr,
        location: SourceLocation,
        /// Location of just the name identifier, for rename.
        name_location: SourceLocation,
    },

    /// `if (cond) ... else ...`.
    If {
        condition: Expr,
        then_branch: Vec<AstNode>,
        else_branch: Vec<AstNode>,
        location: SourceLocation,
    },

    /// `for (bindings) body`.
    For {
        bindings: Vec<Binding>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },

    /// `let (bindings) body`.
    Let {
        bindings: Vec<Binding>,
        body: Vec<AstNode>,
        location: SourceLocation,
    },

    /// `include <path>;` / `use <path>;`.
    Include {
        path: String,
        /// False for `use`, which skips top-level geometry.
        executes_body: bool,
        location: SourceLocation,
    },

    /// Call of a user-defined or unregistered module.
    ModuleCall {
        name: String,
        parameters: Vec<Parameter>,
        children: Vec<AstNode>,
        location: SourceLocation,
        /// Location of just the name identifier, for rename.
        name_location: SourceLocation,
    },

    /// Modifier-prefixed statement (`!`, `#`, `%`, `*`).
    Modifier {
        modifier: char,
        children: Vec<AstNode>,
        location: SourceLocation,
    },
}

impl AstNode {
    /// The node's source location.
    pub fn location(&self) -> SourceLocation {
        match self {
            Self::Cube { location, .. }
            | Self::Sphere { location, .. }
            | Self::Cylinder { location, .. }
            | Self::Circle { location, .. }
            | Self::Square { location, .. }
            | Self::Polygon { location, .. }
            | Self::Transform { location, .. }
            | Self::BooleanOp { location, .. }
            | Self::ModuleDefinition { location, .. }
            | Self::FunctionDefinition { location, .. }
            | Self::Assignment { location, .. }
            | Self::If { location, .. }
            | Self::For { location, .. }
            | Self::Let { location, .. }
            | Self::Include { location, .. }
            | Self::ModuleCall { location, .. }
            | Self::Modifier { location, .. } => *location,
        }
    }

    /// Child geometry nodes, if this node nests any.
    pub fn children(&self) -> &[AstNode] {
        match self {
            Self::Transform { children, .. }
            | Self::BooleanOp { children, .. }
            | Self::ModuleCall { children, .. }
            | Self::Modifier { children, .. } => children,
            Self::ModuleDefinition { body, .. }
            | Self::For { body, .. }
            | Self::Let { body, .. } => body,
            _ => &[],
        }
    }

    /// Display name matching the source-language call or keyword.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Cube { .. } => "cube",
            Self::Sphere { .. } => "sphere",
            Self::Cylinder { .. } => "cylinder",
            Self::Circle { .. } => "circle",
            Self::Square { .. } => "square",
            Self::Polygon { .. } => "polygon",
            Self::Transform { kind, .. } => kind.name(),
            Self::BooleanOp { op, .. } => op.name(),
            Self::ModuleDefinition { .. } => "module",
            Self::FunctionDefinition { .. } => "function",
            Self::Assignment { .. } => "assignment",
            Self::If { .. } => "if",
            Self::For { .. } => "for",
            Self::Let { .. } => "let",
            Self::Include {
                executes_body: true,
                ..
            } => "include",
            Self::Include { .. } => "use",
            Self::ModuleCall { name, .. } => name,
            Self::Modifier { .. } => "modifier",
        }
    }

    /// Visit this node and all descendants in depth-first order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a AstNode)) {
        visit(self);
        let nested: &[AstNode] = match self {
            Self::If {
                then_branch,
                else_branch,
                ..
            } => {
                for child in then_branch.iter().chain(else_branch) {
                    child.walk(visit);
                }
                return;
            }
            _ => self.children(),
        };
        for child in nested {
            child.walk(visit);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
