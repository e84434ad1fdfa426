//! # scad-parser
//!
//! Pure Rust lexer and parser for a procedural solid-modeling language.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → CST
//! ```
//!
//! The parser is error-tolerant: broken statements become Error
//! subtrees, absent tokens become Missing placeholders, and the rest of
//! the file parses normally. [`reparse`] rebuilds the CST after an edit
//! while reusing unaffected statements.
//!
//! ## Example
//!
//! ```rust
//! use scad_parser::parse;
//!
//! let cst = parse("cube(10);");
//! assert!(cst.is_ok());
//! ```
//!
//! ## Pipeline Integration
//!
//! This crate is the first layer of the pipeline:
//!
//! ```text
//! scad-parser → scad-ast → scad-eval → scad-ide
//! ```

pub mod cst;
pub mod error;
pub mod incremental;
pub mod lexer;
pub mod parser;
pub mod span;

// Re-export public API
pub use cst::{Cst, CstNode, NodeKind};
pub use error::{ParseError, ParseErrorKind};
pub use incremental::reparse;
pub use span::{Position, Span, Spanned};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse source code into a Concrete Syntax Tree.
///
/// ## Parameters
///
/// - `source`: source code string
///
/// ## Returns
///
/// `Cst` containing the root node and any parse errors.
///
/// ## Error Handling
///
/// The parser recovers from errors and keeps parsing; errors are
/// collected in `cst.errors` and malformed regions stay in the tree as
/// Error nodes.
///
/// ```rust
/// let cst = scad_parser::parse("cube(;");
/// assert!(!cst.is_ok());
/// ```
pub fn parse(source: &str) -> Cst {
    let tokens = lexer::Lexer::new(source).tokenize();
    let mut parser = parser::Parser::new(source, tokens);
    parser.parse()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cube() {
        let cst = parse("cube(10);");
        assert!(cst.is_ok(), "expected no errors, got: {:?}", cst.errors);
        assert_eq!(cst.root.kind, NodeKind::SourceFile);
        assert_eq!(cst.root.children.len(), 1);
    }

    #[test]
    fn test_parse_vector_argument() {
        let cst = parse("cube([10, 20, 30]);");
        assert!(cst.is_ok(), "expected no errors, got: {:?}", cst.errors);
    }

    #[test]
    fn test_parse_full_model() {
        let cst = parse(
            "size = 20;\n\
             module box(w) { cube([w, w, w / 2]); }\n\
             translate([size, 0, 0]) box(size);\n",
        );
        assert!(cst.is_ok(), "expected no errors, got: {:?}", cst.errors);
        assert_eq!(cst.root.children.len(), 3);
    }

    #[test]
    fn test_error_recovery_keeps_later_statements() {
        let cst = parse("cube(; sphere(5);");
        assert!(!cst.is_ok());
        assert!(cst
            .root
            .children
            .iter()
            .any(|c| c.kind == NodeKind::ModuleCall));
    }

    #[test]
    fn test_unterminated_input_yields_partial_tree() {
        let cst = parse("cube(10); x = ");
        assert!(!cst.is_ok());
        assert_eq!(cst.root.children[0].kind, NodeKind::ModuleCall);
    }

    #[test]
    fn test_idempotent_parse() {
        let source = "for (i = [0:5]) translate([i * 2, 0, 0]) cube(1);";
        let first = parse(source);
        let second = parse(source);
        assert_eq!(first.root, second.root);
        assert_eq!(first.errors, second.errors);
    }
}
