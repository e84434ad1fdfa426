//! # Evaluator Registry
//!
//! The dispatch core: a priority-sorted list of [`Evaluator`]s and a
//! per-kind memo of which evaluator handles which [`NodeKind`].
//! Dispatch is total — a node no evaluator claims yields
//! [`Value::Undef`] with a warning, never an error.

use crate::context::EvalContext;
use crate::value::Value;
use scad_parser::{CstNode, NodeKind};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::warn;

// =============================================================================
// EVALUATOR TRAIT
// =============================================================================

/// Result of evaluating one node.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalOutcome {
    /// The computed value.
    pub value: Value,
    /// Non-fatal findings, surfaced through logging by the registry.
    pub warnings: Vec<String>,
}

impl EvalOutcome {
    pub fn value(value: Value) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    pub fn undef_with_warning(warning: impl Into<String>) -> Self {
        Self {
            value: Value::Undef,
            warnings: vec![warning.into()],
        }
    }
}

/// One evaluation strategy for a family of CST node kinds.
///
/// `can_evaluate` must depend only on the node's kind; the registry
/// memoizes its answer per [`NodeKind`].
pub trait Evaluator: Send + Sync {
    /// Evaluator name, for logging.
    fn name(&self) -> &'static str;

    /// Dispatch priority; higher wins when several evaluators claim
    /// the same kind.
    fn priority(&self) -> u8;

    /// Whether this evaluator handles the node.
    fn can_evaluate(&self, node: &CstNode) -> bool;

    /// Evaluate the node. Operands resolve through
    /// [`EvalContext::eval`], which routes back into the registry.
    fn evaluate(&self, node: &CstNode, ctx: &mut EvalContext<'_>) -> EvalOutcome;
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Priority-sorted evaluator list with per-kind dispatch memoization.
pub struct EvaluatorRegistry {
    evaluators: Vec<Box<dyn Evaluator>>,
    memo: RefCell<HashMap<NodeKind, Option<usize>>>,
}

impl EvaluatorRegistry {
    /// An empty registry. Every node evaluates to `Undef` until
    /// evaluators are registered.
    pub fn new() -> Self {
        Self {
            evaluators: Vec::new(),
            memo: RefCell::new(HashMap::new()),
        }
    }

    /// The standard evaluator set: literals, identifiers, operators
    /// and collections.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(crate::evaluators::LiteralEvaluator));
        registry.register(Box::new(crate::evaluators::IdentifierEvaluator));
        registry.register(Box::new(crate::evaluators::OperatorEvaluator));
        registry.register(Box::new(crate::evaluators::CollectionEvaluator));
        registry
    }

    /// Register an evaluator, keeping the list sorted by descending
    /// priority. Resets the dispatch memo.
    pub fn register(&mut self, evaluator: Box<dyn Evaluator>) {
        let at = self
            .evaluators
            .partition_point(|e| e.priority() >= evaluator.priority());
        self.evaluators.insert(at, evaluator);
        self.memo.borrow_mut().clear();
    }

    /// The highest-priority evaluator claiming this node's kind.
    pub fn find(&self, node: &CstNode) -> Option<&dyn Evaluator> {
        let index = *self
            .memo
            .borrow_mut()
            .entry(node.kind)
            .or_insert_with(|| self.evaluators.iter().position(|e| e.can_evaluate(node)));
        index.map(|i| self.evaluators[i].as_ref())
    }

    /// Dispatch one node. Called by [`EvalContext::eval`], which owns
    /// caching and the depth guard.
    pub(crate) fn dispatch(&self, node: &CstNode, ctx: &mut EvalContext<'_>) -> Value {
        match self.find(node) {
            Some(evaluator) => {
                let outcome = evaluator.evaluate(node, ctx);
                for warning in &outcome.warnings {
                    warn!(evaluator = evaluator.name(), "{warning}");
                }
                outcome.value
            }
            None => {
                warn!(kind = ?node.kind, "no evaluator for node kind");
                Value::Undef
            }
        }
    }
}

impl Default for EvaluatorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use scad_parser::Span;

    struct Claims {
        kind: NodeKind,
        priority: u8,
        name: &'static str,
    }

    impl Evaluator for Claims {
        fn name(&self) -> &'static str {
            self.name
        }
        fn priority(&self) -> u8 {
            self.priority
        }
        fn can_evaluate(&self, node: &CstNode) -> bool {
            node.kind == self.kind
        }
        fn evaluate(&self, _node: &CstNode, _ctx: &mut EvalContext<'_>) -> EvalOutcome {
            EvalOutcome::value(Value::Number(f64::from(self.priority)))
        }
    }

    #[test]
    fn test_higher_priority_wins() {
        let mut registry = EvaluatorRegistry::new();
        registry.register(Box::new(Claims {
            kind: NodeKind::Number,
            priority: 10,
            name: "low",
        }));
        registry.register(Box::new(Claims {
            kind: NodeKind::Number,
            priority: 50,
            name: "high",
        }));

        let node = CstNode::with_text(NodeKind::Number, Span::zero(), "1");
        assert_eq!(registry.find(&node).map(|e| e.name()), Some("high"));
    }

    #[test]
    fn test_unclaimed_kind_dispatches_to_undef() {
        let registry = EvaluatorRegistry::new();
        let node = CstNode::new(NodeKind::Block, Span::zero());
        let mut ctx = EvalContext::new("", &registry);
        assert_eq!(ctx.eval(&node), Value::Undef);
    }

    #[test]
    fn test_registration_resets_memo() {
        let mut registry = EvaluatorRegistry::new();
        let node = CstNode::with_text(NodeKind::Number, Span::zero(), "1");
        assert!(registry.find(&node).is_none());

        registry.register(Box::new(Claims {
            kind: NodeKind::Number,
            priority: 10,
            name: "late",
        }));
        assert_eq!(registry.find(&node).map(|e| e.name()), Some("late"));
    }

    #[test]
    fn test_default_priorities() {
        use crate::evaluators::{IdentifierEvaluator, LiteralEvaluator, OperatorEvaluator};
        assert_eq!(LiteralEvaluator.priority(), 100);
        assert_eq!(IdentifierEvaluator.priority(), 90);
        assert_eq!(OperatorEvaluator.priority(), 80);
    }
}
