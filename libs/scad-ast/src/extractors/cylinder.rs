//! Cylinder extraction.

use crate::ast::AstNode;
use crate::diagnostics::Diagnostics;
use crate::error::ParserError;
use crate::registry::{ExtractedCall, NodeExtractor};

use super::shared;

/// `cylinder(h, r|r1/r2|d/d1/d2, center)`.
///
/// Radius resolution, most specific first: `r1`/`r2`, then `d1`/`d2`
/// halved, then a shared `r`, then `d` halved. A missing `h` is
/// reported as a missing required parameter and stays `None`; no
/// default is synthesized.
pub struct CylinderExtractor;

impl NodeExtractor for CylinderExtractor {
    fn extract(&self, call: ExtractedCall<'_>, diagnostics: &mut Diagnostics) -> AstNode {
        let p = call.parameters;
        let loc = call.location;
        let snip = call.snippet;

        let h = shared::number(p, "h", Some(0), loc, snip, diagnostics);
        let r = shared::number(p, "r", Some(1), loc, snip, diagnostics);
        let d = shared::number(p, "d", None, loc, snip, diagnostics);
        let r1 = shared::number(p, "r1", None, loc, snip, diagnostics);
        let r2 = shared::number(p, "r2", None, loc, snip, diagnostics);
        let d1 = shared::number(p, "d1", None, loc, snip, diagnostics);
        let d2 = shared::number(p, "d2", None, loc, snip, diagnostics);

        let base = r.or_else(|| d.map(|d| d / 2.0));
        let r1 = r1.or_else(|| d1.map(|d| d / 2.0)).or(base);
        let r2 = r2.or_else(|| d2.map(|d| d / 2.0)).or(base);

        // An `h` given as an expression is present, just not foldable;
        // only a truly absent argument is a missing parameter.
        if shared::lookup(p, "h", Some(0)).is_none() {
            diagnostics.error(ParserError::missing_required_parameter(
                "h", "cylinder", loc, snip,
            ));
        }

        AstNode::Cylinder {
            h,
            r1,
            r2,
            center: shared::boolean(p, "center", Some(2), loc, snip, diagnostics),
            fn_: shared::number(p, "$fn", None, loc, snip, diagnostics),
            parameters: p.to_vec(),
            location: loc,
        }
    }
}
