//! # Configuration Constants
//!
//! Limits, reserved-word tables and precision values for the editor core.
//!
//! ## Categories
//!
//! - **Limits**: Recursion and cache bounds
//! - **Precision**: Floating-point comparison tolerance
//! - **Language**: Reserved keywords, special variables, builtin constants

// =============================================================================
// LIMITS
// =============================================================================

/// Maximum expression evaluation depth.
///
/// The evaluator aborts with an `undef` result past this depth instead of
/// overflowing the stack on pathologically nested expressions.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_EVAL_DEPTH;
///
/// let mut depth = 0usize;
/// assert!(depth < MAX_EVAL_DEPTH);
/// depth += 1;
/// ```
pub const MAX_EVAL_DEPTH: usize = 1000;

/// Maximum parser nesting depth.
///
/// The parser records an error and unwinds past this depth instead of
/// overflowing the stack on deeply nested input like `((((...))))`.
pub const MAX_PARSE_DEPTH: usize = 500;

/// Maximum number of entries in the structural query cache.
///
/// When full, the least recently used entry is evicted.
pub const QUERY_CACHE_CAPACITY: usize = 100;

/// Maximum number of memoized subtree results per evaluation pass.
pub const EVAL_CACHE_CAPACITY: usize = 256;

// =============================================================================
// PRECISION
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

// =============================================================================
// LANGUAGE TABLES
// =============================================================================

/// Reserved words that may never be used as a rename target name.
///
/// Covers the language keywords plus the builtin module and function names.
/// Renaming a user symbol to any of these would change program meaning.
pub const RESERVED_KEYWORDS: &[&str] = &[
    // Keywords
    "module", "function", "if", "else", "for", "let", "each", "include",
    "use", "true", "false", "undef",
    // 3D primitives
    "cube", "sphere", "cylinder", "polyhedron",
    // 2D primitives
    "circle", "square", "polygon", "text",
    // Transforms
    "translate", "rotate", "scale", "mirror", "color", "offset", "resize",
    "multmatrix",
    // Booleans
    "union", "difference", "intersection", "hull", "minkowski",
    // Extrusions
    "linear_extrude", "rotate_extrude",
    // Statements
    "echo", "assert", "children",
];

/// Special variables recognized by a leading `$`.
///
/// These control implicit rendering parameters and are passed through
/// argument extraction untyped.
pub const SPECIAL_VARIABLES: &[&str] = &[
    "$fn", "$fa", "$fs", "$t", "$preview", "$children", "$vpr", "$vpt",
    "$vpd",
];

/// Builtin constants that cannot be renamed.
pub const BUILTIN_CONSTANTS: &[&str] = &["PI", "E"];

/// Check whether a name is a reserved keyword.
///
/// # Example
///
/// ```rust
/// use config::constants::is_reserved_keyword;
///
/// assert!(is_reserved_keyword("cube"));
/// assert!(is_reserved_keyword("module"));
/// assert!(!is_reserved_keyword("my_bracket"));
/// ```
pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name)
}

/// Check whether a name is a `$`-prefixed special variable.
pub fn is_special_variable(name: &str) -> bool {
    name.starts_with('$')
}

/// Check whether a name is a builtin constant.
///
/// # Example
///
/// ```rust
/// use config::constants::is_builtin_constant;
///
/// assert!(is_builtin_constant("PI"));
/// assert!(!is_builtin_constant("pi"));
/// ```
pub fn is_builtin_constant(name: &str) -> bool {
    BUILTIN_CONSTANTS.contains(&name)
}

/// Check whether a name is a valid identifier (`[A-Za-z_][A-Za-z0-9_]*`).
///
/// # Example
///
/// ```rust
/// use config::constants::is_valid_identifier;
///
/// assert!(is_valid_identifier("my_var2"));
/// assert!(!is_valid_identifier("2var"));
/// assert!(!is_valid_identifier(""));
/// ```
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
