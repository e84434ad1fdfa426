//! Boolean operation extraction.

use crate::ast::{AstNode, BooleanKind};
use crate::diagnostics::Diagnostics;
use crate::registry::{ExtractedCall, NodeExtractor};

/// `union()`, `difference()`, `intersection()`, `hull()`,
/// `minkowski()` over child geometry. Arguments are ignored; these
/// calls take none.
pub struct BooleanExtractor {
    op: BooleanKind,
}

impl BooleanExtractor {
    pub fn new(op: BooleanKind) -> Self {
        Self { op }
    }
}

impl NodeExtractor for BooleanExtractor {
    fn extract(&self, call: ExtractedCall<'_>, diagnostics: &mut Diagnostics) -> AstNode {
        if call.children.is_empty() {
            diagnostics.warning(format!("'{}' with no children", self.op.name()));
        }
        AstNode::BooleanOp {
            op: self.op,
            children: call.children,
            location: call.location,
        }
    }
}
