//! # Diagnostics Accumulator
//!
//! Collects errors, warnings, and informational notes produced during a
//! build pass. Order of insertion is preserved so diagnostics replay in
//! source order when the builder walks the tree front to back.

use crate::error::ParserError;
use serde::{Deserialize, Serialize};

/// Diagnostics gathered during one CST-to-AST build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Errors, in source order.
    pub errors: Vec<ParserError>,
    /// Warnings, in source order.
    pub warnings: Vec<String>,
    /// Informational notes.
    pub infos: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, error: ParserError) {
        self.errors.push(error);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.infos.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Drop all collected diagnostics.
    pub fn clear(&mut self) {
        self.errors.clear();
        self.warnings.clear();
        self.infos.clear();
    }

    /// Append everything from another accumulator, preserving order.
    pub fn merge(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.infos.extend(other.infos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::SourceLocation;

    #[test]
    fn test_accumulates_in_order() {
        let mut diagnostics = Diagnostics::new();
        assert!(!diagnostics.has_errors());

        diagnostics.error(ParserError::missing_semicolon(SourceLocation::zero(), "x = 1"));
        diagnostics.warning("unused variable 'x'");
        diagnostics.error(ParserError::undefined_variable(
            "y",
            SourceLocation::zero(),
            "y + 1",
        ));

        assert!(diagnostics.has_errors());
        assert!(diagnostics.has_warnings());
        assert_eq!(diagnostics.errors.len(), 2);
        assert!(diagnostics.errors[0].message.contains(";"));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warning("w");
        diagnostics.info("i");
        diagnostics.clear();
        assert_eq!(diagnostics, Diagnostics::new());
    }
}
