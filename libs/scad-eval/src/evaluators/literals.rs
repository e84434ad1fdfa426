//! Literal evaluation.

use crate::context::EvalContext;
use crate::engine::{EvalOutcome, Evaluator};
use crate::value::Value;
use scad_parser::{CstNode, NodeKind};

/// Number, string, boolean and undef literals. Priority 100: a
/// literal's kind is unambiguous, nothing should outrank it.
pub struct LiteralEvaluator;

impl Evaluator for LiteralEvaluator {
    fn name(&self) -> &'static str {
        "literals"
    }

    fn priority(&self) -> u8 {
        100
    }

    fn can_evaluate(&self, node: &CstNode) -> bool {
        node.kind.is_literal()
    }

    fn evaluate(&self, node: &CstNode, _ctx: &mut EvalContext<'_>) -> EvalOutcome {
        match node.kind {
            NodeKind::Number => match node.text_or_empty().parse::<f64>() {
                Ok(n) => EvalOutcome::value(Value::Number(n)),
                Err(_) => EvalOutcome::undef_with_warning(format!(
                    "malformed number literal '{}'",
                    node.text_or_empty()
                )),
            },
            NodeKind::String => {
                let text = node.text_or_empty();
                let text = text.strip_prefix('"').unwrap_or(text);
                let text = text.strip_suffix('"').unwrap_or(text);
                EvalOutcome::value(Value::String(text.to_string()))
            }
            NodeKind::Boolean => {
                EvalOutcome::value(Value::Boolean(node.text_or_empty() == "true"))
            }
            NodeKind::Undef => EvalOutcome::value(Value::Undef),
            other => EvalOutcome::undef_with_warning(format!("not a literal: {other:?}")),
        }
    }
}
