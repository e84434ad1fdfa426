//! Square extraction.

use crate::ast::AstNode;
use crate::diagnostics::Diagnostics;
use crate::registry::{ExtractedCall, NodeExtractor};

use super::shared;

/// `square(size, center)` with scalar or `[x, y]` size.
pub struct SquareExtractor;

impl NodeExtractor for SquareExtractor {
    fn extract(&self, call: ExtractedCall<'_>, diagnostics: &mut Diagnostics) -> AstNode {
        AstNode::Square {
            size: shared::size(
                call.parameters,
                "size",
                Some(0),
                call.location,
                call.snippet,
                diagnostics,
            ),
            center: shared::boolean(
                call.parameters,
                "center",
                Some(1),
                call.location,
                call.snippet,
                diagnostics,
            ),
            parameters: call.parameters.to_vec(),
            location: call.location,
        }
    }
}
