//! # Editor Session
//!
//! A session owns one document's pipeline state: the current source
//! text, its CST, the lowered AST with diagnostics, and the structural
//! query cache. Edits go through [`Session::update`], which reparses
//! incrementally and rebuilds the AST, leaving the session
//! indistinguishable from one created fresh on the new text.

use crate::cancel::CancellationToken;
use crate::query::{run_query, QueryCache};
use scad_ast::{AstBuilder, AstNode, Diagnostics, ExtractorRegistry};
use scad_eval::{EvalContext, EvaluatorRegistry, Value};
use scad_parser::{Cst, CstNode, NodeKind, Span};
use tracing::{debug, info};

// =============================================================================
// SESSION
// =============================================================================

/// Per-document pipeline state.
pub struct Session {
    source: String,
    cst: Cst,
    ast: Vec<AstNode>,
    diagnostics: Diagnostics,
    registry: ExtractorRegistry,
    query_cache: QueryCache,
}

impl Session {
    /// Parse `source` and build the full pipeline state.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let registry = ExtractorRegistry::with_builtins();
        let cst = scad_parser::parse(&source);
        let (ast, diagnostics) = AstBuilder::new(&source, &registry).build(&cst);

        info!(
            bytes = source.len(),
            statements = ast.len(),
            errors = diagnostics.errors.len(),
            "session created"
        );

        Self {
            source,
            cst,
            ast,
            diagnostics,
            registry,
            query_cache: QueryCache::new(),
        }
    }

    /// Current source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Current concrete syntax tree.
    pub fn cst(&self) -> &Cst {
        &self.cst
    }

    /// Current AST statements.
    pub fn ast(&self) -> &[AstNode] {
        &self.ast
    }

    /// Diagnostics from the latest parse and lowering.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Apply a contiguous edit: bytes `[start, old_end)` of the current
    /// text were replaced by `[start, new_end)` of `new_text`.
    ///
    /// The CST is reparsed incrementally and the AST rebuilt, so the
    /// resulting state matches [`Session::new`] on `new_text`.
    pub fn update(&mut self, new_text: &str, start: usize, old_end: usize, new_end: usize) {
        debug!(start, old_end, new_end, "session update");

        self.cst = self.cst.update(new_text, start, old_end, new_end);
        self.source = new_text.to_string();

        let (ast, diagnostics) = AstBuilder::new(&self.source, &self.registry).build(&self.cst);
        self.ast = ast;
        self.diagnostics = diagnostics;
    }

    /// Cancellable [`Session::update`]. The token is checked before
    /// the reparse and again before committing; an observed
    /// cancellation leaves the session untouched and returns `false`.
    pub fn update_cancellable(
        &mut self,
        new_text: &str,
        start: usize,
        old_end: usize,
        new_end: usize,
        token: &CancellationToken,
    ) -> bool {
        if token.is_cancelled() {
            debug!("update cancelled before start");
            return false;
        }

        let cst = self.cst.update(new_text, start, old_end, new_end);
        if token.is_cancelled() {
            debug!("update cancelled before commit");
            return false;
        }

        let source = new_text.to_string();
        let (ast, diagnostics) = AstBuilder::new(&source, &self.registry).build(&cst);
        self.source = source;
        self.cst = cst;
        self.ast = ast;
        self.diagnostics = diagnostics;
        true
    }

    /// Spans of all CST nodes matching a kind-name query, served from
    /// the cache when the source is unchanged.
    pub fn query(&mut self, query: &str) -> Vec<Span> {
        if let Some(cached) = self.query_cache.get(query, &self.source) {
            return cached;
        }
        let result = run_query(&self.cst.root, query);
        self.query_cache.insert(query, &self.source, result.clone());
        result
    }

    /// Query cache hit/miss counters.
    pub fn cache_stats(&self) -> crate::query::CacheStats {
        self.query_cache.stats()
    }

    /// Evaluate the innermost expression covering a byte offset, with
    /// the document's top-level assignments bound. Used for hover
    /// values; non-evaluable positions yield None.
    pub fn eval_at(&self, offset: usize) -> Option<Value> {
        let expr = expression_at(&self.cst.root, offset)?;

        let registry = EvaluatorRegistry::with_defaults();
        let mut ctx = EvalContext::new(&self.source, &registry);
        for stmt in &self.cst.root.children {
            if stmt.kind == NodeKind::Assignment {
                if let (Some(name), Some(value)) = (stmt.children.first(), stmt.children.get(1)) {
                    let bound = ctx.eval(value);
                    ctx.set_variable(name.text_or_empty(), bound);
                }
            }
        }
        Some(ctx.eval(expr))
    }
}

/// Deepest expression node whose span covers the offset.
fn expression_at(node: &CstNode, offset: usize) -> Option<&CstNode> {
    if !node.span.contains(offset) {
        return None;
    }
    node.children
        .iter()
        .find_map(|child| expression_at(child, offset))
        .or_else(|| node.kind.is_expression().then_some(node))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_matches_fresh_session() {
        let mut session = Session::new("cube(10);\nsphere(5);");
        let new_text = "cube(10);\nsphere(7);";
        session.update(new_text, 17, 18, 18);

        let fresh = Session::new(new_text);
        assert_eq!(session.ast(), fresh.ast());
        assert_eq!(session.cst().root, fresh.cst().root);
        assert_eq!(session.diagnostics(), fresh.diagnostics());
    }

    #[test]
    fn test_query_uses_cache_on_repeat() {
        let mut session = Session::new("cube(1); sphere(2); cylinder(h=3, r=1);");

        let first = session.query("module_call");
        let second = session.query("module_call");
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);

        let stats = session.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_query_recomputes_after_edit() {
        let mut session = Session::new("cube(1);");
        assert_eq!(session.query("module_call").len(), 1);

        let new_text = "cube(1); sphere(2);";
        session.update(new_text, 8, 8, new_text.len());
        assert_eq!(session.query("module_call").len(), 2);
    }

    #[test]
    fn test_eval_at_uses_document_bindings() {
        let source = "r = 4;\nx = r * 2 + 1;";
        let session = Session::new(source);

        let offset = source.find("r * 2 + 1").unwrap();
        assert_eq!(session.eval_at(offset + 6), Some(Value::Number(9.0)));

        // Offset on the `=` sign is not an expression.
        assert_eq!(session.eval_at(source.find('=').unwrap()), None);
    }

    #[test]
    fn test_cancelled_update_leaves_state() {
        let mut session = Session::new("cube(1);");
        let token = CancellationToken::new();
        token.cancel();

        let applied = session.update_cancellable("sphere(2);", 0, 8, 10, &token);
        assert!(!applied);
        assert_eq!(session.source(), "cube(1);");
        assert_eq!(session.ast().len(), 1);
    }
}
