//! Identifier and special-variable evaluation.

use crate::context::EvalContext;
use crate::engine::{EvalOutcome, Evaluator};
use crate::value::Value;
use scad_parser::{CstNode, NodeKind};

/// Identifier and `$`-variable lookup in the context's bindings.
/// An unbound name evaluates to undef with a warning.
pub struct IdentifierEvaluator;

impl Evaluator for IdentifierEvaluator {
    fn name(&self) -> &'static str {
        "identifiers"
    }

    fn priority(&self) -> u8 {
        90
    }

    fn can_evaluate(&self, node: &CstNode) -> bool {
        matches!(node.kind, NodeKind::Identifier | NodeKind::SpecialVariable)
    }

    fn evaluate(&self, node: &CstNode, ctx: &mut EvalContext<'_>) -> EvalOutcome {
        let name = node.text_or_empty();
        match ctx.get_variable(name) {
            Some(value) => EvalOutcome::value(value.clone()),
            None => EvalOutcome::undef_with_warning(format!("undefined variable '{name}'")),
        }
    }
}
