//! # Evaluation Context
//!
//! Per-pass state for one evaluation: variable bindings, the subtree
//! memo cache, and the recursion depth counter. A context borrows the
//! source buffer so evaluators can inspect the raw text behind a node.

use crate::engine::EvaluatorRegistry;
use crate::value::Value;
use config::constants::{EVAL_CACHE_CAPACITY, MAX_EVAL_DEPTH};
use scad_parser::{CstNode, NodeKind};
use std::collections::HashMap;
use tracing::warn;

/// Cache key for one evaluated subtree within a pass.
///
/// Kind plus span identifies a node; the text guards against a stale
/// tree evaluated against a changed buffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    kind: NodeKind,
    text: String,
    start: usize,
    end: usize,
}

impl CacheKey {
    fn of(node: &CstNode) -> Self {
        Self {
            kind: node.kind,
            text: node.text_or_empty().to_string(),
            start: node.span.start.byte,
            end: node.span.end.byte,
        }
    }
}

/// Mutable state threaded through one evaluation pass.
pub struct EvalContext<'a> {
    source: &'a str,
    registry: &'a EvaluatorRegistry,
    variables: HashMap<String, Value>,
    cache: HashMap<CacheKey, Value>,
    depth: usize,
}

impl<'a> EvalContext<'a> {
    pub fn new(source: &'a str, registry: &'a EvaluatorRegistry) -> Self {
        Self {
            source,
            registry,
            variables: HashMap::new(),
            cache: HashMap::new(),
            depth: 0,
        }
    }

    /// A context over a different buffer, carrying this context's
    /// bindings and depth. For subtrees re-parsed from synthesized
    /// text, whose node spans index that text rather than the
    /// document.
    pub fn for_buffer<'b>(&self, source: &'b str) -> EvalContext<'b>
    where
        'a: 'b,
    {
        EvalContext {
            source,
            registry: self.registry,
            variables: self.variables.clone(),
            cache: HashMap::new(),
            depth: self.depth,
        }
    }

    /// The raw source text behind a node.
    pub fn text_of(&self, node: &CstNode) -> &'a str {
        self.source
            .get(node.span.start.byte..node.span.end.byte)
            .unwrap_or("")
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Number of memoized subtree results.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Evaluate a subtree through the registry, with memoization and
    /// the recursion guard. This is the entry point evaluators use to
    /// resolve their operands.
    pub fn eval(&mut self, node: &CstNode) -> Value {
        let key = CacheKey::of(node);
        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }

        if self.depth >= MAX_EVAL_DEPTH {
            warn!(
                kind = ?node.kind,
                depth = self.depth,
                "evaluation depth limit reached"
            );
            return Value::Undef;
        }

        self.depth += 1;
        let registry = self.registry;
        let value = registry.dispatch(node, self);
        self.depth -= 1;

        if self.cache.len() < EVAL_CACHE_CAPACITY {
            self.cache.insert(key, value.clone());
        }
        value
    }
}

// =============================================================================
// TESTS
// =============================================================================
