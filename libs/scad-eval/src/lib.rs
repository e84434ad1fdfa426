//! # scad-eval
//!
//! Trait-based expression evaluation over the scad CST. A small
//! [`Evaluator`] trait plus a priority-sorted [`EvaluatorRegistry`]
//! replace a per-node-type hierarchy: each evaluator claims a family
//! of node kinds, and dispatch memoizes the winner per kind.
//!
//! Evaluation is total: unsupported nodes, unbound variables and
//! exceeded depth limits all produce [`Value::Undef`] with a logged
//! warning, never an error or a panic. An interactive editor asking
//! "what is this argument worth" must always get an answer.
//!
//! ## Example
//!
//! ```rust
//! use scad_eval::{evaluate, Value};
//!
//! assert_eq!(evaluate("1 + 2 * 3"), Value::Number(7.0));
//! assert_eq!(evaluate("\"r=\" + 4"), Value::String("r=4".into()));
//! ```

pub mod context;
pub mod engine;
pub mod evaluators;
pub mod value;

pub use context::EvalContext;
pub use engine::{EvalOutcome, Evaluator, EvaluatorRegistry};
pub use value::Value;

/// Evaluate a standalone expression with the default evaluators and
/// no variable bindings.
pub fn evaluate(expression: &str) -> Value {
    let full = format!("__eval = {expression};");
    let cst = scad_parser::parse(&full);
    let Some(node) = cst
        .root
        .children
        .first()
        .and_then(|stmt| stmt.children.get(1))
    else {
        return Value::Undef;
    };

    let registry = EvaluatorRegistry::with_defaults();
    let mut ctx = EvalContext::new(&full, &registry);
    ctx.eval(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_convenience() {
        assert_eq!(evaluate("2 ^ 10"), Value::Number(1024.0));
        assert_eq!(evaluate("true ? 1 : 2"), Value::Number(1.0));
    }

    #[test]
    fn test_evaluate_is_total_on_garbage() {
        assert_eq!(evaluate("@@"), Value::Undef);
        assert_eq!(evaluate(""), Value::Undef);
    }
}
