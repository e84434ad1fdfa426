//! Polygon extraction.

use crate::ast::{AstNode, ParamValue};
use crate::diagnostics::Diagnostics;
use crate::expr::{Expr, ExprKind};
use crate::registry::{ExtractedCall, NodeExtractor};

use super::shared;

/// `polygon(points, paths)`.
///
/// Points and paths stay expressions; nested vectors are not flattened
/// during extraction.
pub struct PolygonExtractor;

fn as_expr(value: &ParamValue, location: crate::location::SourceLocation) -> Expr {
    match value {
        ParamValue::Expr(e) => e.clone(),
        ParamValue::Number(n) => Expr {
            kind: ExprKind::Number(*n),
            location,
        },
        ParamValue::Boolean(b) => Expr {
            kind: ExprKind::Boolean(*b),
            location,
        },
        ParamValue::String(s) => Expr {
            kind: ExprKind::String(s.clone()),
            location,
        },
        ParamValue::Vector(v) => Expr {
            kind: ExprKind::List(
                v.iter()
                    .map(|n| Expr {
                        kind: ExprKind::Number(*n),
                        location,
                    })
                    .collect(),
            ),
            location,
        },
    }
}

impl NodeExtractor for PolygonExtractor {
    fn extract(&self, call: ExtractedCall<'_>, _diagnostics: &mut Diagnostics) -> AstNode {
        let points = shared::lookup(call.parameters, "points", Some(0))
            .map(|v| as_expr(v, call.location));
        let paths = shared::lookup(call.parameters, "paths", Some(1))
            .map(|v| as_expr(v, call.location));
        AstNode::Polygon {
            points,
            paths,
            location: call.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Parameter;
    use crate::location::SourceLocation;

    #[test]
    fn test_points_stay_expressions() {
        let triangle = Expr {
            kind: ExprKind::List(vec![]),
            location: SourceLocation::zero(),
        };
        let params = vec![Parameter::named(
            "points",
            ParamValue::Expr(triangle.clone()),
        )];
        let mut diagnostics = Diagnostics::new();
        let node = PolygonExtractor.extract(
            ExtractedCall {
                name: "polygon",
                parameters: &params,
                children: Vec::new(),
                location: SourceLocation::zero(),
                name_location: SourceLocation::zero(),
                snippet: "",
            },
            &mut diagnostics,
        );
        match node {
            AstNode::Polygon { points, paths, .. } => {
                assert_eq!(points, Some(triangle));
                assert_eq!(paths, None);
            }
            other => panic!("expected Polygon, got {other:?}"),
        }
    }
}
