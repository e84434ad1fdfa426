//! # Extractor Registry
//!
//! Call-name-keyed registry of node extractors. Built-in geometry
//! (`cube`, `translate`, `union`, ...) is registered up front; callers
//! can register additional extractors for their own call names. Names
//! with no registered extractor fall through to a generic
//! [`AstNode::ModuleCall`](crate::ast::AstNode::ModuleCall).
//!
//! ## Example
//!
//! ```rust
//! use scad_ast::registry::ExtractorRegistry;
//!
//! let registry = ExtractorRegistry::with_builtins();
//! assert!(registry.has("cube"));
//! assert!(!registry.has("my_bracket"));
//! ```

use crate::ast::{AstNode, Parameter};
use crate::diagnostics::Diagnostics;
use crate::location::SourceLocation;
use std::collections::HashMap;
use thiserror::Error;

// =============================================================================
// EXTRACTION INPUT
// =============================================================================

/// A module call after argument lowering, ready for extraction.
pub struct ExtractedCall<'a> {
    /// Call name as written in source.
    pub name: &'a str,
    /// Lowered arguments, in source order.
    pub parameters: &'a [Parameter],
    /// Already-built child geometry.
    pub children: Vec<AstNode>,
    /// Location of the whole call statement.
    pub location: SourceLocation,
    /// Location of the call name identifier.
    pub name_location: SourceLocation,
    /// Raw source text of the call.
    pub snippet: &'a str,
}

/// Turns one lowered call into an AST node.
///
/// Extraction is total: malformed arguments are reported through the
/// diagnostics accumulator and the corresponding field stays `None`.
pub trait NodeExtractor: Send + Sync {
    fn extract(&self, call: ExtractedCall<'_>, diagnostics: &mut Diagnostics) -> AstNode;
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Registry lookup or registration failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Registration with an empty call name.
    #[error("invalid registration: call name must not be empty")]
    InvalidRegistration,
}

/// Call-name-keyed extractor registry.
pub struct ExtractorRegistry {
    extractors: HashMap<String, Box<dyn NodeExtractor>>,
}

impl ExtractorRegistry {
    /// An empty registry with no extractors.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// A registry pre-loaded with the built-in geometry extractors.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::extractors::register_builtins(&mut registry);
        registry
    }

    /// Register an extractor under a call name. Re-registration
    /// replaces the previous extractor.
    pub fn register(
        &mut self,
        name: &str,
        extractor: Box<dyn NodeExtractor>,
    ) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::InvalidRegistration);
        }
        self.extractors.insert(name.to_string(), extractor);
        Ok(())
    }

    /// The extractor for a call name, if one is registered.
    pub fn get(&self, name: &str) -> Option<&dyn NodeExtractor> {
        self.extractors.get(name).map(|e| e.as_ref())
    }

    /// Whether a call name has a registered extractor.
    pub fn has(&self, name: &str) -> bool {
        self.extractors.contains_key(name)
    }

    /// All registered call names, sorted.
    pub fn registered_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.extractors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedNode;

    impl NodeExtractor for FixedNode {
        fn extract(&self, call: ExtractedCall<'_>, _diagnostics: &mut Diagnostics) -> AstNode {
            AstNode::ModuleCall {
                name: call.name.to_string(),
                parameters: call.parameters.to_vec(),
                children: call.children,
                location: call.location,
                name_location: call.name_location,
            }
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ExtractorRegistry::new();
        assert!(!registry.has("gear"));
        registry.register("gear", Box::new(FixedNode)).expect("valid name");
        assert!(registry.has("gear"));
        assert!(registry.get("gear").is_some());
        assert!(registry.get("sprocket").is_none());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut registry = ExtractorRegistry::new();
        assert_eq!(
            registry.register("", Box::new(FixedNode)),
            Err(RegistryError::InvalidRegistration)
        );
    }

    #[test]
    fn test_registered_names_are_sorted() {
        let mut registry = ExtractorRegistry::new();
        registry.register("zeta", Box::new(FixedNode)).expect("valid");
        registry.register("alpha", Box::new(FixedNode)).expect("valid");
        assert_eq!(registry.registered_names(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_builtins_cover_primitives_transforms_and_booleans() {
        let registry = ExtractorRegistry::with_builtins();
        for name in [
            "cube", "sphere", "cylinder", "circle", "square", "polygon",
            "translate", "rotate", "scale", "mirror", "color", "offset",
            "union", "difference", "intersection", "hull", "minkowski",
        ] {
            assert!(registry.has(name), "missing builtin '{name}'");
        }
    }
}
