//! Sphere extraction.

use crate::ast::AstNode;
use crate::diagnostics::Diagnostics;
use crate::registry::{ExtractedCall, NodeExtractor};

use super::shared;

/// `sphere(r|d)` with `$fn`/`$fa`/`$fs` facet controls.
///
/// `d` halves into `r` only when no radius was given; an explicit `r`
/// wins over `d`.
pub struct SphereExtractor;

impl NodeExtractor for SphereExtractor {
    fn extract(&self, call: ExtractedCall<'_>, diagnostics: &mut Diagnostics) -> AstNode {
        let r = shared::number(
            call.parameters,
            "r",
            Some(0),
            call.location,
            call.snippet,
            diagnostics,
        );
        let d = shared::number(
            call.parameters,
            "d",
            None,
            call.location,
            call.snippet,
            diagnostics,
        );
        let r = r.or_else(|| d.map(|d| d / 2.0));

        AstNode::Sphere {
            r,
            fn_: shared::number(call.parameters, "$fn", None, call.location, call.snippet, diagnostics),
            fa: shared::number(call.parameters, "$fa", None, call.location, call.snippet, diagnostics),
            fs: shared::number(call.parameters, "$fs", None, call.location, call.snippet, diagnostics),
            parameters: call.parameters.to_vec(),
            location: call.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Parameter, ParamValue};
    use crate::location::SourceLocation;

    fn extract(parameters: &[Parameter]) -> AstNode {
        let mut diagnostics = Diagnostics::new();
        SphereExtractor.extract(
            ExtractedCall {
                name: "sphere",
                parameters,
                children: Vec::new(),
                location: SourceLocation::zero(),
                name_location: SourceLocation::zero(),
                snippet: "",
            },
            &mut diagnostics,
        )
    }

    #[test]
    fn test_positional_radius() {
        match extract(&[Parameter::positional(ParamValue::Number(5.0))]) {
            AstNode::Sphere { r, .. } => assert_eq!(r, Some(5.0)),
            other => panic!("expected Sphere, got {other:?}"),
        }
    }

    #[test]
    fn test_diameter_halves_into_radius() {
        match extract(&[Parameter::named("d", ParamValue::Number(8.0))]) {
            AstNode::Sphere { r, .. } => assert_eq!(r, Some(4.0)),
            other => panic!("expected Sphere, got {other:?}"),
        }
    }

    #[test]
    fn test_explicit_radius_wins_over_diameter() {
        let params = vec![
            Parameter::named("r", ParamValue::Number(3.0)),
            Parameter::named("d", ParamValue::Number(100.0)),
        ];
        match extract(&params) {
            AstNode::Sphere { r, .. } => assert_eq!(r, Some(3.0)),
            other => panic!("expected Sphere, got {other:?}"),
        }
    }

    #[test]
    fn test_facet_controls() {
        let params = vec![
            Parameter::positional(ParamValue::Number(2.0)),
            Parameter::named("$fn", ParamValue::Number(64.0)),
        ];
        match extract(&params) {
            AstNode::Sphere { fn_, .. } => assert_eq!(fn_, Some(64.0)),
            other => panic!("expected Sphere, got {other:?}"),
        }
    }
}
