//! List and range evaluation.
//!
//! Includes the range-vs-vector compatibility shim: a list node whose
//! raw text contains one or two colons at bracket depth zero is
//! treated as a range, with each segment evaluated as an independent
//! sub-expression. Grammar-level disambiguation is tracked separately;
//! the shim keeps trees from older grammars evaluating correctly.

use crate::context::EvalContext;
use crate::engine::{EvalOutcome, Evaluator};
use crate::value::Value;
use scad_parser::{CstNode, NodeKind};

pub struct CollectionEvaluator;

impl Evaluator for CollectionEvaluator {
    fn name(&self) -> &'static str {
        "collections"
    }

    fn priority(&self) -> u8 {
        70
    }

    fn can_evaluate(&self, node: &CstNode) -> bool {
        matches!(node.kind, NodeKind::List | NodeKind::Range)
    }

    fn evaluate(&self, node: &CstNode, ctx: &mut EvalContext<'_>) -> EvalOutcome {
        match node.kind {
            NodeKind::Range => self.eval_range(node, ctx),
            NodeKind::List => {
                let raw = ctx.text_of(node);
                match split_range_segments(raw) {
                    Some(segments) => eval_text_range(&segments, ctx),
                    None => {
                        let items = node.children.iter().map(|c| ctx.eval(c)).collect();
                        EvalOutcome::value(Value::Vector(items))
                    }
                }
            }
            other => EvalOutcome::undef_with_warning(format!("not a collection: {other:?}")),
        }
    }
}

impl CollectionEvaluator {
    fn eval_range(&self, node: &CstNode, ctx: &mut EvalContext<'_>) -> EvalOutcome {
        // Two children for [start:end], three for [start:step:end].
        let value = match node.children.as_slice() {
            [start, end] => Value::Range {
                start: ctx.eval(start).to_number(),
                step: 1.0,
                end: ctx.eval(end).to_number(),
            },
            [start, step, end] => Value::Range {
                start: ctx.eval(start).to_number(),
                step: ctx.eval(step).to_number(),
                end: ctx.eval(end).to_number(),
            },
            _ => return EvalOutcome::undef_with_warning("malformed range"),
        };
        EvalOutcome::value(value)
    }
}

/// Split the inner text of `[...]` at depth-zero colons. Returns the
/// segments when there are one or two such colons, `None` otherwise.
fn split_range_segments(raw: &str) -> Option<Vec<String>> {
    let inner = raw
        .trim()
        .strip_prefix('[')?
        .strip_suffix(']')
        .unwrap_or_default();

    let mut depth = 0usize;
    // Open ternaries; their colons belong to `?:`, not the range.
    let mut ternaries = 0usize;
    let mut segments = vec![String::new()];
    for c in inner.chars() {
        match c {
            '[' | '(' | '{' => depth += 1,
            ']' | ')' | '}' => depth = depth.saturating_sub(1),
            '?' if depth == 0 => ternaries += 1,
            ':' if depth == 0 => {
                if ternaries > 0 {
                    ternaries -= 1;
                } else {
                    segments.push(String::new());
                    continue;
                }
            }
            _ => {}
        }
        if let Some(last) = segments.last_mut() {
            last.push(c);
        }
    }

    match segments.len() {
        2 | 3 => Some(segments),
        _ => None,
    }
}

/// Evaluate colon-separated segments as sub-expressions and assemble
/// the range value.
fn eval_text_range(segments: &[String], ctx: &mut EvalContext<'_>) -> EvalOutcome {
    let mut numbers = Vec::with_capacity(segments.len());
    for segment in segments {
        let full = format!("x = {};", segment.trim());
        let cst = scad_parser::parse(&full);
        let Some(expr) = cst
            .root
            .children
            .first()
            .and_then(|stmt| stmt.children.get(1))
        else {
            return EvalOutcome::undef_with_warning(format!(
                "unparsable range segment '{segment}'"
            ));
        };
        // The re-parsed spans index the segment buffer, so the segment
        // evaluates in a context over that buffer, not the document.
        let mut segment_ctx = ctx.for_buffer(&full);
        numbers.push(segment_ctx.eval(expr).to_number());
    }

    let value = match numbers.as_slice() {
        [start, end] => Value::Range {
            start: *start,
            step: 1.0,
            end: *end,
        },
        [start, step, end] => Value::Range {
            start: *start,
            step: *step,
            end: *end,
        },
        _ => return EvalOutcome::undef_with_warning("malformed range segments"),
    };
    EvalOutcome::value(value)
}

// =============================================================================
// TESTS
// =============================================================================
