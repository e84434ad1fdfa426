//! # Built-in Extractors
//!
//! One extractor per built-in call family, registered into the
//! [`ExtractorRegistry`] by [`register_builtins`]. Each file owns the
//! argument conventions of its call: name-over-position precedence,
//! diameter-to-radius derivation, and type checks.

mod booleans;
mod circle;
mod cube;
mod cylinder;
mod polygon;
mod shared;
mod sphere;
mod square;
mod transforms;

pub use booleans::BooleanExtractor;
pub use circle::CircleExtractor;
pub use cube::CubeExtractor;
pub use cylinder::CylinderExtractor;
pub use polygon::PolygonExtractor;
pub use sphere::SphereExtractor;
pub use square::SquareExtractor;
pub use transforms::TransformExtractor;

use crate::ast::{BooleanKind, TransformKind};
use crate::registry::ExtractorRegistry;

/// Register every built-in extractor. Names are non-empty constants,
/// so registration cannot fail.
pub fn register_builtins(registry: &mut ExtractorRegistry) {
    let ok = [
        registry.register("cube", Box::new(CubeExtractor)),
        registry.register("sphere", Box::new(SphereExtractor)),
        registry.register("cylinder", Box::new(CylinderExtractor)),
        registry.register("circle", Box::new(CircleExtractor)),
        registry.register("square", Box::new(SquareExtractor)),
        registry.register("polygon", Box::new(PolygonExtractor)),
    ];
    debug_assert!(ok.iter().all(Result::is_ok));

    for kind in [
        TransformKind::Translate,
        TransformKind::Rotate,
        TransformKind::Scale,
        TransformKind::Mirror,
        TransformKind::Color,
        TransformKind::Offset,
    ] {
        let result = registry.register(kind.name(), Box::new(TransformExtractor::new(kind)));
        debug_assert!(result.is_ok());
    }

    for op in [
        BooleanKind::Union,
        BooleanKind::Difference,
        BooleanKind::Intersection,
        BooleanKind::Hull,
        BooleanKind::Minkowski,
    ] {
        let result = registry.register(op.name(), Box::new(BooleanExtractor::new(op)));
        debug_assert!(result.is_ok());
    }
}
