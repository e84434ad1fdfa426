//! # scad-ast
//!
//! Typed AST for the scad pipeline, built from the CST produced by
//! [`scad_parser`]. The crate covers four concerns:
//!
//! - **AST types** ([`ast`], [`expr`], [`location`]): location-carrying
//!   nodes with typed primitive parameters.
//! - **Extraction** ([`registry`], [`extractors`]): call-name-keyed
//!   extractors that normalize arguments (diameters into radii,
//!   scalars into sizes) into typed fields.
//! - **Building** ([`builder`]): the CST walk that dispatches on node
//!   kind and assembles the tree.
//! - **Errors** ([`error`], [`diagnostics`], [`recovery`]): structured
//!   diagnostics with stable codes, and recovery strategies that keep
//!   one damaged statement from sinking the rest of the file.
//!
//! ## Example
//!
//! ```rust
//! use scad_ast::{parse_to_ast, AstNode};
//!
//! let (ast, diagnostics) = parse_to_ast("translate([5, 0, 0]) cube(10);");
//! assert!(!diagnostics.has_errors());
//! assert!(matches!(ast[0], AstNode::Transform { .. }));
//! ```

pub mod ast;
pub mod builder;
pub mod diagnostics;
pub mod error;
pub mod expr;
pub mod extractors;
pub mod location;
pub mod recovery;
pub mod registry;

pub use ast::{AstNode, BooleanKind, CubeSize, ParamDecl, ParamValue, Parameter, TransformKind};
pub use builder::AstBuilder;
pub use diagnostics::Diagnostics;
pub use error::{ErrorCode, ParserError};
pub use expr::{BinaryOp, Binding, Expr, ExprKind, UnaryOp};
pub use location::SourceLocation;
pub use registry::{ExtractorRegistry, NodeExtractor, RegistryError};

/// Parse source and build its AST with the built-in extractors.
pub fn parse_to_ast(source: &str) -> (Vec<AstNode>, Diagnostics) {
    let cst = scad_parser::parse(source);
    let registry = ExtractorRegistry::with_builtins();
    AstBuilder::new(source, &registry).build(&cst)
}
