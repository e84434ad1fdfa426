//! Unary, binary and ternary operator evaluation.
//!
//! Arithmetic follows the language's coercion rules: `+` concatenates
//! when either side is a string, division by zero yields sign-correct
//! infinity, modulo by zero yields NaN, `^` is `powf`. Comparisons
//! compare strings lexicographically and coerce everything else
//! through [`Value::to_number`].

use crate::context::EvalContext;
use crate::engine::{EvalOutcome, Evaluator};
use crate::value::Value;
use scad_parser::{CstNode, NodeKind};

pub struct OperatorEvaluator;

impl Evaluator for OperatorEvaluator {
    fn name(&self) -> &'static str {
        "operators"
    }

    fn priority(&self) -> u8 {
        80
    }

    fn can_evaluate(&self, node: &CstNode) -> bool {
        matches!(
            node.kind,
            NodeKind::BinaryExpression | NodeKind::UnaryExpression | NodeKind::TernaryExpression
        )
    }

    fn evaluate(&self, node: &CstNode, ctx: &mut EvalContext<'_>) -> EvalOutcome {
        match node.kind {
            NodeKind::BinaryExpression => self.eval_binary(node, ctx),
            NodeKind::UnaryExpression => self.eval_unary(node, ctx),
            NodeKind::TernaryExpression => self.eval_ternary(node, ctx),
            other => EvalOutcome::undef_with_warning(format!("not an operator node: {other:?}")),
        }
    }
}

impl OperatorEvaluator {
    fn eval_binary(&self, node: &CstNode, ctx: &mut EvalContext<'_>) -> EvalOutcome {
        // Children: [left, operator, right].
        let (Some(left_node), Some(op_node), Some(right_node)) = (
            node.children.first(),
            node.children.get(1),
            node.children.get(2),
        ) else {
            return EvalOutcome::undef_with_warning("malformed binary expression");
        };

        let left = ctx.eval(left_node);
        let right = ctx.eval(right_node);
        apply_binary(op_node.text_or_empty(), &left, &right)
    }

    fn eval_unary(&self, node: &CstNode, ctx: &mut EvalContext<'_>) -> EvalOutcome {
        // Children: [operator, operand].
        let (Some(op_node), Some(operand_node)) =
            (node.children.first(), node.children.get(1))
        else {
            return EvalOutcome::undef_with_warning("malformed unary expression");
        };

        let operand = ctx.eval(operand_node);
        let value = match op_node.text_or_empty() {
            "-" => operand
                .as_number()
                .map(|n| Value::Number(-n))
                .unwrap_or(Value::Undef),
            "+" => operand
                .as_number()
                .map(Value::Number)
                .unwrap_or(Value::Undef),
            "!" => Value::Boolean(!operand.is_truthy()),
            other => {
                return EvalOutcome::undef_with_warning(format!("unknown unary operator '{other}'"))
            }
        };
        EvalOutcome::value(value)
    }

    fn eval_ternary(&self, node: &CstNode, ctx: &mut EvalContext<'_>) -> EvalOutcome {
        let (Some(condition), Some(then_node), Some(else_node)) = (
            node.children.first(),
            node.children.get(1),
            node.children.get(2),
        ) else {
            return EvalOutcome::undef_with_warning("malformed ternary expression");
        };

        let branch = if ctx.eval(condition).is_truthy() {
            then_node
        } else {
            else_node
        };
        EvalOutcome::value(ctx.eval(branch))
    }
}

fn apply_binary(op: &str, left: &Value, right: &Value) -> EvalOutcome {
    let value = match op {
        "+" => {
            if matches!(left, Value::String(_)) || matches!(right, Value::String(_)) {
                Value::String(format!("{}{}", display_text(left), display_text(right)))
            } else {
                Value::Number(left.to_number() + right.to_number())
            }
        }
        "-" => Value::Number(left.to_number() - right.to_number()),
        "*" => Value::Number(left.to_number() * right.to_number()),
        // IEEE division already yields sign-correct infinity for x/0
        // and NaN for 0/0.
        "/" => Value::Number(left.to_number() / right.to_number()),
        "%" => {
            let divisor = right.to_number();
            if divisor == 0.0 {
                Value::Number(f64::NAN)
            } else {
                Value::Number(left.to_number() % divisor)
            }
        }
        "^" => Value::Number(left.to_number().powf(right.to_number())),

        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        "<" | ">" | "<=" | ">=" => compare(op, left, right),

        "&&" => Value::Boolean(left.is_truthy() && right.is_truthy()),
        "||" => Value::Boolean(left.is_truthy() || right.is_truthy()),

        other => {
            return EvalOutcome::undef_with_warning(format!("unknown binary operator '{other}'"))
        }
    };
    EvalOutcome::value(value)
}

fn compare(op: &str, left: &Value, right: &Value) -> Value {
    if let (Value::String(l), Value::String(r)) = (left, right) {
        return Value::Boolean(match op {
            "<" => l < r,
            ">" => l > r,
            "<=" => l <= r,
            _ => l >= r,
        });
    }
    let (l, r) = (left.to_number(), right.to_number());
    Value::Boolean(match op {
        "<" => l < r,
        ">" => l > r,
        "<=" => l <= r,
        _ => l >= r,
    })
}

/// String rendering for concatenation: strings render bare, other
/// values via their display form.
fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EvaluatorRegistry;

    fn eval(source: &str) -> Value {
        let full = format!("x = {source};");
        let cst = scad_parser::parse(&full);
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);
        let registry = EvaluatorRegistry::with_defaults();
        let mut ctx = EvalContext::new(&full, &registry);
        ctx.eval(&cst.root.children[0].children[1])
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("1 + 2 * 3"), Value::Number(7.0));
        assert_eq!(eval("(1 + 2) * 3"), Value::Number(9.0));
        assert_eq!(eval("2 ^ 3 ^ 2"), Value::Number(512.0));
    }

    #[test]
    fn test_division_by_zero_is_signed_infinity() {
        assert_eq!(eval("1 / 0"), Value::Number(f64::INFINITY));
        assert_eq!(eval("-1 / 0"), Value::Number(f64::NEG_INFINITY));
        match eval("0 / 0") {
            Value::Number(n) => assert!(n.is_nan()),
            other => panic!("expected NaN, got {other:?}"),
        }
    }

    #[test]
    fn test_modulo_by_zero_is_nan() {
        match eval("5 % 0") {
            Value::Number(n) => assert!(n.is_nan()),
            other => panic!("expected NaN, got {other:?}"),
        }
        assert_eq!(eval("7 % 3"), Value::Number(1.0));
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(eval("\"a\" + \"b\""), Value::String("ab".into()));
        assert_eq!(eval("\"n=\" + 4"), Value::String("n=4".into()));
        assert_eq!(eval("1 + \"x\""), Value::String("1x".into()));
    }

    #[test]
    fn test_comparisons_coerce() {
        assert_eq!(eval("true + true"), Value::Number(2.0));
        assert_eq!(eval("\"10\" < 9"), Value::Boolean(false));
        assert_eq!(eval("\"abc\" < \"abd\""), Value::Boolean(true));
        assert_eq!(eval("1 == 1"), Value::Boolean(true));
        assert_eq!(eval("\"a\" != \"b\""), Value::Boolean(true));
    }

    #[test]
    fn test_logic_and_ternary() {
        assert_eq!(eval("true && false"), Value::Boolean(false));
        assert_eq!(eval("0 || \"x\""), Value::Boolean(true));
        assert_eq!(eval("1 > 0 ? 10 : 20"), Value::Number(10.0));
        assert_eq!(eval("!1 ? 10 : 20"), Value::Number(20.0));
    }

    #[test]
    fn test_unary() {
        assert_eq!(eval("-5"), Value::Number(-5.0));
        assert_eq!(eval("!false"), Value::Boolean(true));
        assert_eq!(eval("-undef"), Value::Undef);
    }
}
