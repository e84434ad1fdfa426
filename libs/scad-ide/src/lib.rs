//! # scad-ide
//!
//! Editor-facing services on top of the scad pipeline: a per-document
//! [`Session`] holding source, CST and AST in sync through incremental
//! edits, a bounded [`QueryCache`] for structural queries, an
//! on-demand [`SymbolTable`], and scope-aware rename.
//!
//! ## Example
//!
//! ```rust
//! use scad_ide::{provide_rename_edits, rename::apply_edits, Session};
//!
//! let source = "size = 4;\nbracket(size);";
//! let session = Session::new(source);
//!
//! let edits = provide_rename_edits(&session, 0, "width").unwrap();
//! assert_eq!(apply_edits(source, &edits), "width = 4;\nbracket(width);");
//! ```

pub mod cancel;
pub mod query;
pub mod rename;
pub mod session;
pub mod symbols;

pub use cancel::CancellationToken;
pub use query::{CacheStats, QueryCache};
pub use rename::{prepare_rename, provide_rename_edits, PrepareRename, RenameError, TextEdit};
pub use session::Session;
pub use symbols::{Scope, ScopeId, Symbol, SymbolId, SymbolKind, SymbolTable};
