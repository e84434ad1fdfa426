//! # Incremental Reparse
//!
//! Reparses an edited source while reusing top-level statements that
//! end strictly before the edit. Reused statements are byte-identical
//! in the new source, so splicing them is equivalent to a full parse;
//! everything from the first affected statement onward is parsed fresh
//! from a re-lex of the new text.
//!
//! A statement is only reused if its subtree is error-free. Error and
//! Missing nodes mark regions whose extent depended on recovery
//! heuristics, and an edit right after them can change how far they
//! should reach.
//!
//! ## Example
//!
//! ```rust
//! let old = scad_parser::parse("cube(10);\nsphere(5);");
//! // Edit replaces "5" at byte 17.
//! let new = scad_parser::reparse(&old, "cube(10);\nsphere(7);", 17);
//! assert!(new.is_ok());
//! ```

use crate::cst::{Cst, CstNode, NodeKind};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::span::Span;
use tracing::debug;

impl Cst {
    /// Reparse after a single contiguous edit: bytes
    /// `[start, old_end)` of the old text were replaced by
    /// `[start, new_end)` of `new_text`.
    ///
    /// Statement reuse only depends on where the edit begins; the end
    /// offsets describe the edit for callers tracking deltas.
    pub fn update(&self, new_text: &str, start: usize, old_end: usize, new_end: usize) -> Cst {
        debug!(start, old_end, new_end, "cst update");
        reparse(self, new_text, start)
    }
}

/// Reparse `new_source` after an edit whose first changed byte is
/// `edit_start`, reusing unaffected statements from `old`.
///
/// ## Parameters
///
/// - `old`: CST of the source before the edit
/// - `new_source`: Full text after the edit
/// - `edit_start`: Byte offset of the first changed byte
///
/// ## Returns
///
/// A CST equal to what [`crate::parse`] would produce for `new_source`.
pub fn reparse(old: &Cst, new_source: &str, edit_start: usize) -> Cst {
    let edit_start = edit_start.min(new_source.len());

    // Top-level statements ending strictly before the edit are
    // unchanged byte ranges in the new source.
    let reused: Vec<CstNode> = old
        .root
        .children
        .iter()
        .take_while(|stmt| stmt.span.end.byte < edit_start && !stmt.has_error())
        .cloned()
        .collect();

    let tail_start = reused.last().map(|s| s.span.end.byte).unwrap_or(0);

    debug!(
        reused = reused.len(),
        total = old.root.children.len(),
        tail_start,
        "incremental reparse"
    );

    // Lexing is linear; only parsing is skipped for the prefix.
    let tokens = Lexer::new(new_source).tokenize();
    let first_tail = tokens
        .iter()
        .position(|t| t.is_eof() || t.span.start.byte >= tail_start)
        .unwrap_or(tokens.len() - 1);

    let mut parser = Parser::new(new_source, tokens[first_tail..].to_vec());
    let tail = parser.parse();

    // Statements with clean subtrees can still carry lexical errors,
    // like an invalid number literal. Those survive reuse, so their
    // errors carry over too; everything else is re-reported by the
    // tail parse.
    let mut errors: Vec<_> = old
        .errors
        .iter()
        .filter(|e| e.span.end.byte < tail_start)
        .cloned()
        .collect();
    errors.extend(tail.errors);

    let mut children = reused;
    children.extend(tail.root.children);

    // Same rule as a full parse: first statement start through last
    // statement end.
    let root_span = match (children.first(), children.last()) {
        (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
        _ => tail.root.span,
    };

    Cst::new(
        CstNode::with_children(NodeKind::SourceFile, root_span, children),
        errors,
    )
}

// =============================================================================
// TESTS
// =============================================================================
