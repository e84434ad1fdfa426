//! Transform extraction.
//!
//! All six transforms share one shape: a single argument plus child
//! geometry, so one extractor parameterized by [`TransformKind`]
//! covers them.

use crate::ast::{AstNode, TransformKind};
use crate::diagnostics::Diagnostics;
use crate::registry::{ExtractedCall, NodeExtractor};

use super::shared;

/// `translate(v)`, `rotate(a)`, `scale(v)`, `mirror(v)`, `color(c)`,
/// `offset(r)` with child geometry.
pub struct TransformExtractor {
    kind: TransformKind,
}

impl TransformExtractor {
    pub fn new(kind: TransformKind) -> Self {
        Self { kind }
    }
}

impl NodeExtractor for TransformExtractor {
    fn extract(&self, call: ExtractedCall<'_>, _diagnostics: &mut Diagnostics) -> AstNode {
        // First argument regardless of spelling: `translate(v=[1,2,3])`
        // and `translate([1,2,3])` both land here.
        let argument = shared::lookup(call.parameters, self.argument_name(), Some(0)).cloned();
        AstNode::Transform {
            kind: self.kind,
            argument,
            children: call.children,
            location: call.location,
        }
    }
}

impl TransformExtractor {
    fn argument_name(&self) -> &'static str {
        match self.kind {
            TransformKind::Translate | TransformKind::Scale | TransformKind::Mirror => "v",
            TransformKind::Rotate => "a",
            TransformKind::Color => "c",
            TransformKind::Offset => "r",
        }
    }
}
