//! CST expression lowering.
//!
//! Lowering is total: a malformed subtree becomes
//! [`ExprKind::Error`] carrying its raw text, never a panic.

use crate::expr::{BinaryOp, Binding, Expr, ExprKind, UnaryOp};
use crate::location::SourceLocation;
use scad_parser::{CstNode, NodeKind};
use tracing::warn;

/// Lower a CST expression node to an [`Expr`].
pub fn lower_expression(node: &CstNode) -> Expr {
    let location = SourceLocation::from(node.span);

    let kind = match node.kind {
        NodeKind::Number => match node.text_or_empty().parse::<f64>() {
            Ok(n) => ExprKind::Number(n),
            Err(_) => ExprKind::Error(node.text_or_empty().to_string()),
        },
        NodeKind::String => ExprKind::String(strip_quotes(node.text_or_empty())),
        NodeKind::Boolean => ExprKind::Boolean(node.text_or_empty() == "true"),
        NodeKind::Undef => ExprKind::Undef,
        NodeKind::Identifier => ExprKind::Identifier(node.text_or_empty().to_string()),
        NodeKind::SpecialVariable => ExprKind::SpecialVariable(node.text_or_empty().to_string()),

        NodeKind::UnaryExpression => lower_unary(node),
        NodeKind::BinaryExpression => lower_binary(node),
        NodeKind::TernaryExpression => lower_ternary(node),
        NodeKind::Range => lower_range(node),
        NodeKind::List => ExprKind::List(node.children.iter().map(lower_expression).collect()),
        NodeKind::ListComprehension => lower_comprehension(node),
        NodeKind::FunctionCall => lower_function_call(node),
        NodeKind::IndexExpression => lower_index(node),
        NodeKind::DotExpression => lower_member(node),

        _ => {
            warn!(kind = ?node.kind, "node is not an expression");
            ExprKind::Error(node.text_or_empty().to_string())
        }
    };

    Expr::new(kind, location)
}

/// Lower a `ForAssignments` node to its bindings.
pub fn lower_bindings(node: &CstNode) -> Vec<Binding> {
    node.find_children(NodeKind::ForAssignment)
        .into_iter()
        .filter_map(|binding| {
            let name = binding.children.first()?;
            let value = binding.children.get(1)?;
            Some(Binding {
                name: name.text_or_empty().to_string(),
                name_location: SourceLocation::from(name.span),
                value: lower_expression(value),
            })
        })
        .collect()
}

fn strip_quotes(text: &str) -> String {
    let text = text.strip_prefix('"').unwrap_or(text);
    let text = text.strip_suffix('"').unwrap_or(text);
    text.to_string()
}

fn error_kind(node: &CstNode) -> ExprKind {
    ExprKind::Error(node.text_or_empty().to_string())
}

fn lower_unary(node: &CstNode) -> ExprKind {
    // Children: [operator, operand].
    let (Some(op_node), Some(operand)) = (node.children.first(), node.children.get(1)) else {
        return error_kind(node);
    };
    match UnaryOp::from_text(op_node.text_or_empty()) {
        Some(op) => ExprKind::Unary {
            op,
            operand: Box::new(lower_expression(operand)),
        },
        None => error_kind(node),
    }
}

fn lower_binary(node: &CstNode) -> ExprKind {
    // Children: [left, operator, right].
    let (Some(left), Some(op_node), Some(right)) = (
        node.children.first(),
        node.children.get(1),
        node.children.get(2),
    ) else {
        return error_kind(node);
    };
    match BinaryOp::from_text(op_node.text_or_empty()) {
        Some(op) => ExprKind::Binary {
            op,
            left: Box::new(lower_expression(left)),
            right: Box::new(lower_expression(right)),
        },
        None => error_kind(node),
    }
}

fn lower_ternary(node: &CstNode) -> ExprKind {
    let (Some(condition), Some(then_expr), Some(else_expr)) = (
        node.children.first(),
        node.children.get(1),
        node.children.get(2),
    ) else {
        return error_kind(node);
    };
    ExprKind::Ternary {
        condition: Box::new(lower_expression(condition)),
        then_expr: Box::new(lower_expression(then_expr)),
        else_expr: Box::new(lower_expression(else_expr)),
    }
}

fn lower_range(node: &CstNode) -> ExprKind {
    // Two children for [start:end], three for [start:step:end].
    match node.children.as_slice() {
        [start, end] => ExprKind::Range {
            start: Box::new(lower_expression(start)),
            step: None,
            end: Box::new(lower_expression(end)),
        },
        [start, step, end] => ExprKind::Range {
            start: Box::new(lower_expression(start)),
            step: Some(Box::new(lower_expression(step))),
            end: Box::new(lower_expression(end)),
        },
        _ => error_kind(node),
    }
}

fn lower_comprehension(node: &CstNode) -> ExprKind {
    // Two children for a real comprehension, one for a bare `each`.
    match node.children.as_slice() {
        [bindings, element] => ExprKind::ListComprehension {
            bindings: lower_bindings(bindings),
            element: Box::new(lower_expression(element)),
        },
        [operand] => ExprKind::Each(Box::new(lower_expression(operand))),
        _ => error_kind(node),
    }
}

fn lower_function_call(node: &CstNode) -> ExprKind {
    let (Some(callee), Some(args)) = (node.children.first(), node.children.get(1)) else {
        return error_kind(node);
    };
    let arguments = args
        .children
        .iter()
        .filter_map(|arg| match arg.kind {
            NodeKind::Argument => arg.children.first(),
            // Value only; expression-position calls ignore the name.
            NodeKind::NamedArgument => arg.children.get(1),
            _ => None,
        })
        .map(lower_expression)
        .collect();
    ExprKind::FunctionCall {
        name: callee.text_or_empty().to_string(),
        arguments,
    }
}

fn lower_index(node: &CstNode) -> ExprKind {
    let (Some(object), Some(index)) = (node.children.first(), node.children.get(1)) else {
        return error_kind(node);
    };
    ExprKind::Index {
        object: Box::new(lower_expression(object)),
        index: Box::new(lower_expression(index)),
    }
}

fn lower_member(node: &CstNode) -> ExprKind {
    let (Some(object), Some(field)) = (node.children.first(), node.children.get(1)) else {
        return error_kind(node);
    };
    ExprKind::Member {
        object: Box::new(lower_expression(object)),
        field: field.text_or_empty().to_string(),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lower(source: &str) -> Expr {
        let full = format!("x = {source};");
        let cst = scad_parser::parse(&full);
        assert!(cst.is_ok(), "errors: {:?}", cst.errors);
        lower_expression(&cst.root.children[0].children[1])
    }

    #[test]
    fn test_precedence_survives_lowering() {
        let expr = lower("1 + 2 * 3");
        match expr.kind {
            ExprKind::Binary { op, left, right } => {
                assert_eq!(op, BinaryOp::Add);
                assert_eq!(left.as_number(), Some(1.0));
                assert!(matches!(
                    right.kind,
                    ExprKind::Binary { op: BinaryOp::Mul, .. }
                ));
            }
            other => panic!("expected Binary, got {other:?}"),
        }
    }

    #[test]
    fn test_string_quotes_are_stripped() {
        assert_eq!(lower("\"steel\"").kind, ExprKind::String("steel".into()));
    }

    #[test]
    fn test_stepped_range_with_expression_segments() {
        let expr = lower("[a+1 : b*2 : c]");
        match expr.kind {
            ExprKind::Range { start, step, end } => {
                assert!(matches!(start.kind, ExprKind::Binary { .. }));
                assert!(matches!(
                    step.as_deref().map(|s| &s.kind),
                    Some(ExprKind::Binary { .. })
                ));
                assert!(matches!(end.kind, ExprKind::Identifier(_)));
            }
            other => panic!("expected Range, got {other:?}"),
        }
    }

    #[test]
    fn test_ternary_and_comparison() {
        let expr = lower("x > 0 ? x : -x");
        match expr.kind {
            ExprKind::Ternary { condition, else_expr, .. } => {
                assert!(matches!(
                    condition.kind,
                    ExprKind::Binary { op: BinaryOp::Gt, .. }
                ));
                assert!(matches!(
                    else_expr.kind,
                    ExprKind::Unary { op: UnaryOp::Neg, .. }
                ));
            }
            other => panic!("expected Ternary, got {other:?}"),
        }
    }

    #[test]
    fn test_list_comprehension() {
        let expr = lower("[for (i = [0:5]) i * i]");
        match expr.kind {
            ExprKind::ListComprehension { bindings, element } => {
                assert_eq!(bindings.len(), 1);
                assert_eq!(bindings[0].name, "i");
                assert!(matches!(element.kind, ExprKind::Binary { .. }));
            }
            other => panic!("expected ListComprehension, got {other:?}"),
        }
    }

    #[test]
    fn test_function_call_and_member_access() {
        let expr = lower("sin(v.x)");
        match expr.kind {
            ExprKind::FunctionCall { name, arguments } => {
                assert_eq!(name, "sin");
                assert!(matches!(arguments[0].kind, ExprKind::Member { .. }));
            }
            other => panic!("expected FunctionCall, got {other:?}"),
        }
    }
}
