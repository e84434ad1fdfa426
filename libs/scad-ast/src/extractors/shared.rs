//! Shared argument lookup helpers for the built-in extractors.
//!
//! Lookup follows call convention: a named argument wins, otherwise
//! the value at the positional index (counting only unnamed
//! arguments). Type mismatches surface through diagnostics and return
//! `None` so extraction stays total.

use crate::ast::{CubeSize, Parameter, ParamValue};
use crate::diagnostics::Diagnostics;
use crate::error::ParserError;
use crate::location::SourceLocation;

/// Argument value by name, falling back to a positional index.
pub fn lookup<'a>(
    parameters: &'a [Parameter],
    name: &str,
    index: Option<usize>,
) -> Option<&'a ParamValue> {
    if let Some(named) = parameters
        .iter()
        .find(|p| p.name.as_deref() == Some(name))
    {
        return Some(&named.value);
    }
    let index = index?;
    parameters
        .iter()
        .filter(|p| p.name.is_none())
        .nth(index)
        .map(|p| &p.value)
}

/// Numeric argument, reporting a type mismatch for non-numbers.
pub fn number(
    parameters: &[Parameter],
    name: &str,
    index: Option<usize>,
    location: SourceLocation,
    snippet: &str,
    diagnostics: &mut Diagnostics,
) -> Option<f64> {
    let value = lookup(parameters, name, index)?;
    match value {
        ParamValue::Number(n) => Some(*n),
        ParamValue::Expr(_) => None,
        other => {
            diagnostics.error(ParserError::type_mismatch(
                "number",
                type_label(other),
                location,
                snippet,
            ));
            None
        }
    }
}

/// Boolean argument, reporting a type mismatch for non-booleans.
pub fn boolean(
    parameters: &[Parameter],
    name: &str,
    index: Option<usize>,
    location: SourceLocation,
    snippet: &str,
    diagnostics: &mut Diagnostics,
) -> Option<bool> {
    let value = lookup(parameters, name, index)?;
    match value {
        ParamValue::Boolean(b) => Some(*b),
        ParamValue::Expr(_) => None,
        other => {
            diagnostics.error(ParserError::type_mismatch(
                "boolean",
                type_label(other),
                location,
                snippet,
            ));
            None
        }
    }
}

/// Scalar-or-vector size argument.
pub fn size(
    parameters: &[Parameter],
    name: &str,
    index: Option<usize>,
    location: SourceLocation,
    snippet: &str,
    diagnostics: &mut Diagnostics,
) -> Option<CubeSize> {
    let value = lookup(parameters, name, index)?;
    match value {
        ParamValue::Number(n) => Some(CubeSize::Scalar(*n)),
        ParamValue::Vector(v) => Some(CubeSize::Vector(v.clone())),
        ParamValue::Expr(_) => None,
        other => {
            diagnostics.error(ParserError::type_mismatch(
                "number or vector",
                type_label(other),
                location,
                snippet,
            ));
            None
        }
    }
}

fn type_label(value: &ParamValue) -> &'static str {
    match value {
        ParamValue::Number(_) => "number",
        ParamValue::Boolean(_) => "boolean",
        ParamValue::String(_) => "string",
        ParamValue::Vector(_) => "vector",
        ParamValue::Expr(_) => "expression",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_beats_positional() {
        let params = vec![
            Parameter::positional(ParamValue::Number(1.0)),
            Parameter::named("r", ParamValue::Number(5.0)),
        ];
        assert_eq!(
            lookup(&params, "r", Some(0)),
            Some(&ParamValue::Number(5.0))
        );
    }

    #[test]
    fn test_positional_index_ignores_named() {
        let params = vec![
            Parameter::named("center", ParamValue::Boolean(true)),
            Parameter::positional(ParamValue::Number(3.0)),
        ];
        assert_eq!(
            lookup(&params, "h", Some(0)),
            Some(&ParamValue::Number(3.0))
        );
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let params = vec![Parameter::named("r", ParamValue::String("big".into()))];
        let mut diagnostics = Diagnostics::new();
        let r = number(
            &params,
            "r",
            None,
            SourceLocation::zero(),
            "sphere(r=\"big\")",
            &mut diagnostics,
        );
        assert_eq!(r, None);
        assert!(diagnostics.has_errors());
    }
}
