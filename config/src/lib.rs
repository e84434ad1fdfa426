//! # Config Crate
//!
//! Centralized configuration constants for the OpenSCAD editor core.
//! All tunable limits, reserved-word tables and precision values are
//! defined here to ensure consistency across crates.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{MAX_EVAL_DEPTH, QUERY_CACHE_CAPACITY};
//!
//! assert!(MAX_EVAL_DEPTH >= 100);
//! assert!(QUERY_CACHE_CAPACITY > 0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Pure constants, safe for any target
//! - **OpenSCAD Compatible**: Keyword and special-variable sets match the language

pub mod constants;
