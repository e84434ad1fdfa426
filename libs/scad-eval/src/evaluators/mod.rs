//! # Built-in Evaluators
//!
//! The standard evaluator set, one file per family. Priorities are
//! fixed: literals 100, identifiers 90, operators 80, collections 70.

mod collections;
mod identifiers;
mod literals;
mod operators;

pub use collections::CollectionEvaluator;
pub use identifiers::IdentifierEvaluator;
pub use literals::LiteralEvaluator;
pub use operators::OperatorEvaluator;
