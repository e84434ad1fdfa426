//! Argument lowering.
//!
//! Turns a CST `Arguments` node into ordered [`Parameter`]s. Literal
//! values (numbers, strings, booleans, flat numeric vectors, negated
//! numbers) extract to native [`ParamValue`]s; anything else stays an
//! unevaluated expression.

use crate::ast::{Parameter, ParamValue};
use crate::builder::expressions::lower_expression;
use scad_parser::{CstNode, NodeKind};

/// Lower an `Arguments` node, preserving argument order.
pub fn lower_arguments(args: &CstNode) -> Vec<Parameter> {
    args.children
        .iter()
        .filter_map(|arg| match arg.kind {
            NodeKind::Argument => {
                let value = arg.children.first()?;
                Some(Parameter::positional(lower_value(value)))
            }
            NodeKind::NamedArgument => {
                let name = arg.children.first()?;
                let value = arg.children.get(1)?;
                Some(Parameter::named(name.text_or_empty(), lower_value(value)))
            }
            _ => None,
        })
        .collect()
}

/// Extract a literal value, or keep the expression.
fn lower_value(node: &CstNode) -> ParamValue {
    if let Some(n) = literal_number(node) {
        return ParamValue::Number(n);
    }
    match node.kind {
        NodeKind::Boolean => ParamValue::Boolean(node.text_or_empty() == "true"),
        NodeKind::String => {
            let text = node.text_or_empty();
            let text = text.strip_prefix('"').unwrap_or(text);
            let text = text.strip_suffix('"').unwrap_or(text);
            ParamValue::String(text.to_string())
        }
        NodeKind::List => match flat_numeric_vector(node) {
            Some(v) => ParamValue::Vector(v),
            None => ParamValue::Expr(lower_expression(node)),
        },
        _ => ParamValue::Expr(lower_expression(node)),
    }
}

/// Numeric literal, including a unary-negated one.
fn literal_number(node: &CstNode) -> Option<f64> {
    match node.kind {
        NodeKind::Number => node.text_or_empty().parse().ok(),
        NodeKind::UnaryExpression => {
            let op = node.children.first()?;
            let operand = node.children.get(1)?;
            if operand.kind != NodeKind::Number {
                return None;
            }
            let n: f64 = operand.text_or_empty().parse().ok()?;
            match op.text_or_empty() {
                "-" => Some(-n),
                "+" => Some(n),
                _ => None,
            }
        }
        _ => None,
    }
}

/// All-literal-number list, like `[10, -20, 30]`.
fn flat_numeric_vector(node: &CstNode) -> Option<Vec<f64>> {
    node.children.iter().map(literal_number).collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lower(source: &str) -> Vec<Parameter> {
        let cst = scad_parser::parse(source);
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);
        let call = &cst.root.children[0];
        let args = call.find_child(NodeKind::Arguments).expect("arguments");
        lower_arguments(args)
    }

    #[test]
    fn test_positional_and_named() {
        let params = lower("cube(10, center=true);");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0], Parameter::positional(ParamValue::Number(10.0)));
        assert_eq!(params[1], Parameter::named("center", ParamValue::Boolean(true)));
    }

    #[test]
    fn test_negative_number_extracts() {
        let params = lower("translate([-5, 0, 2.5]) cube(1);");
        assert_eq!(
            params[0].value,
            ParamValue::Vector(vec![-5.0, 0.0, 2.5])
        );
    }

    #[test]
    fn test_string_argument() {
        let params = lower("color(\"red\") cube(1);");
        assert_eq!(params[0].value, ParamValue::String("red".into()));
    }

    #[test]
    fn test_non_literal_stays_expression() {
        let params = lower("cube(size * 2);");
        assert!(matches!(params[0].value, ParamValue::Expr(_)));
    }

    #[test]
    fn test_vector_with_expression_element_stays_expression() {
        let params = lower("translate([x, 0, 0]) cube(1);");
        assert!(matches!(params[0].value, ParamValue::Expr(_)));
    }

    #[test]
    fn test_special_variable_argument_name() {
        let params = lower("sphere(2, $fn=64);");
        assert_eq!(params[1], Parameter::named("$fn", ParamValue::Number(64.0)));
    }
}
