//! Cube extraction.

use crate::ast::AstNode;
use crate::diagnostics::Diagnostics;
use crate::registry::{ExtractedCall, NodeExtractor};

use super::shared;

/// `cube(size, center)` with scalar or vector size.
pub struct CubeExtractor;

impl NodeExtractor for CubeExtractor {
    fn extract(&self, call: ExtractedCall<'_>, diagnostics: &mut Diagnostics) -> AstNode {
        let size = shared::size(
            call.parameters,
            "size",
            Some(0),
            call.location,
            call.snippet,
            diagnostics,
        );
        let center = shared::boolean(
            call.parameters,
            "center",
            Some(1),
            call.location,
            call.snippet,
            diagnostics,
        );
        AstNode::Cube {
            size,
            center,
            parameters: call.parameters.to_vec(),
            location: call.location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CubeSize, Parameter, ParamValue};
    use crate::location::SourceLocation;

    fn call<'a>(parameters: &'a [Parameter]) -> ExtractedCall<'a> {
        ExtractedCall {
            name: "cube",
            parameters,
            children: Vec::new(),
            location: SourceLocation::zero(),
            name_location: SourceLocation::zero(),
            snippet: "",
        }
    }

    #[test]
    fn test_scalar_size() {
        let params = vec![Parameter::positional(ParamValue::Number(10.0))];
        let mut diagnostics = Diagnostics::new();
        let node = CubeExtractor.extract(call(&params), &mut diagnostics);
        match node {
            AstNode::Cube { size, center, parameters, .. } => {
                assert_eq!(size, Some(CubeSize::Scalar(10.0)));
                assert_eq!(center, None);
                assert_eq!(parameters, params);
            }
            other => panic!("expected Cube, got {other:?}"),
        }
        assert!(!diagnostics.has_errors());
    }

    #[test]
    fn test_vector_size_with_center() {
        let params = vec![
            Parameter::named("size", ParamValue::Vector(vec![1.0, 2.0, 3.0])),
            Parameter::named("center", ParamValue::Boolean(true)),
        ];
        let mut diagnostics = Diagnostics::new();
        let node = CubeExtractor.extract(call(&params), &mut diagnostics);
        match node {
            AstNode::Cube { size, center, .. } => {
                assert_eq!(size, Some(CubeSize::Vector(vec![1.0, 2.0, 3.0])));
                assert_eq!(center, Some(true));
            }
            other => panic!("expected Cube, got {other:?}"),
        }
    }

    #[test]
    fn test_no_arguments_yields_none_fields() {
        let mut diagnostics = Diagnostics::new();
        let node = CubeExtractor.extract(call(&[]), &mut diagnostics);
        match node {
            AstNode::Cube { size, center, .. } => {
                assert_eq!(size, None);
                assert_eq!(center, None);
            }
            other => panic!("expected Cube, got {other:?}"),
        }
    }
}
