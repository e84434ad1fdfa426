//! # Runtime Values
//!
//! Dynamic values produced by expression evaluation. The language is
//! dynamically typed; coercions follow its arithmetic rules, so
//! `to_number` and `to_boolean` are total.
//!
//! ## Example
//!
//! ```rust
//! use scad_eval::Value;
//!
//! assert_eq!(Value::Boolean(true).to_number(), 1.0);
//! assert_eq!(Value::String("42".into()).to_number(), 42.0);
//! assert_eq!(Value::String("pots".into()).to_number(), 0.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dynamically-typed runtime value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    /// The undefined value. Carries no payload.
    Undef,
    Boolean(bool),
    Number(f64),
    String(String),
    Vector(Vec<Value>),
    Range { start: f64, step: f64, end: f64 },
}

impl Value {
    /// Type name: one of `number`, `string`, `boolean`, `vector`,
    /// `range`, `undef`.
    pub const fn value_type(&self) -> &'static str {
        match self {
            Self::Undef => "undef",
            Self::Boolean(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Vector(_) => "vector",
            Self::Range { .. } => "range",
        }
    }

    /// Truthiness: false, zero, the empty string, the empty vector and
    /// undef are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Boolean(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Vector(v) => !v.is_empty(),
            Self::Range { .. } => true,
            Self::Undef => false,
        }
    }

    /// Total numeric coercion: booleans become 0/1, strings parse or
    /// fall back to 0, everything else becomes 0.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Self::String(s) => s.trim().parse().unwrap_or(0.0),
            Self::Vector(_) | Self::Range { .. } | Self::Undef => 0.0,
        }
    }

    /// The numeric value without coercion.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undef => write!(f, "undef"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Vector(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Range { start, step, end } => write!(f, "[{start} : {step} : {end}]"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(Value::Number(1.0).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(Value::String("x".into()).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(!Value::Undef.is_truthy());
        assert!(Value::Range { start: 0.0, step: 1.0, end: 0.0 }.is_truthy());
    }

    #[test]
    fn test_numeric_coercion_is_total() {
        assert_eq!(Value::Boolean(false).to_number(), 0.0);
        assert_eq!(Value::String(" 2.5 ".into()).to_number(), 2.5);
        assert_eq!(Value::String("abc".into()).to_number(), 0.0);
        assert_eq!(Value::Undef.to_number(), 0.0);
        assert_eq!(Value::Vector(vec![]).to_number(), 0.0);
    }

    #[test]
    fn test_value_type_names() {
        assert_eq!(Value::Undef.value_type(), "undef");
        assert_eq!(Value::Vector(vec![]).value_type(), "vector");
    }

    #[test]
    fn test_undef_serializes_without_payload() {
        let json = serde_json::to_string(&Value::Undef).expect("serializable");
        assert!(json.contains("undef"));
        assert!(!json.contains("value"));
    }
}
