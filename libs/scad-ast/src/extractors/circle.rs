//! Circle extraction.

use crate::ast::AstNode;
use crate::diagnostics::Diagnostics;
use crate::registry::{ExtractedCall, NodeExtractor};

use super::shared;

/// `circle(r|d)` with `$fn`.
pub struct CircleExtractor;

impl NodeExtractor for CircleExtractor {
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
        AstNode::Circle {
            r: r.or_else(|| d.map(|d| d / 2.0)),
            fn_: shared::number(
                call.parameters,
                "$fn",
                None,
                call.location,
                call.snippet,
                diagnostics,
            ),
            parameters: call.parameters.to_vec(),
            location: call.location,
        }
    }
}
