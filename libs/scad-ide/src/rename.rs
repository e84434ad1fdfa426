//! # Rename
//!
//! Workspace rename over the session's symbol table. The operation
//! runs as an explicit pipeline of stages; each stage either advances
//! with more context or stops the whole operation, so a rename never
//! emits a partial edit set.
//!
//! `prepare_rename` answers "can the thing under the cursor be
//! renamed" with the exact range and placeholder text;
//! `provide_rename_edits` computes the full edit set or nothing.

use crate::cancel::CancellationToken;
use crate::session::Session;
use crate::symbols::{SymbolId, SymbolKind, SymbolTable};
use scad_ast::SourceLocation;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

// =============================================================================
// TYPES
// =============================================================================

/// Why a rename cannot start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    #[error("no symbol at the requested position")]
    NoSymbolAtPosition,
    #[error("'{0}' is a built-in constant and cannot be renamed")]
    CannotRenameConstant(String),
}

/// One text replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextEdit {
    pub range: SourceLocation,
    pub new_text: String,
}

/// Range and placeholder for the editor's rename prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareRename {
    /// Range of the occurrence under the cursor.
    pub range: SourceLocation,
    /// Current name, pre-filled into the prompt.
    pub placeholder: String,
}

/// Pipeline stages, in order. Logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Prepare,
    ValidateTarget,
    ComputeReferences,
    ValidateNewName,
    EmitEdits,
}

// =============================================================================
// PREPARE
// =============================================================================

/// Resolve the symbol under `offset` and report whether it is
/// renameable.
///
/// Returns `Ok(None)` when the token was cancelled before the lookup
/// ran.
pub fn prepare_rename(
    session: &Session,
    offset: usize,
    token: &CancellationToken,
) -> Result<Option<PrepareRename>, RenameError> {
    debug!(offset, stage = ?Stage::Prepare, "rename");
    if token.is_cancelled() {
        return Ok(None);
    }

    let table = SymbolTable::build(session.ast());
    let (id, range) = target_at(&table, offset).ok_or(RenameError::NoSymbolAtPosition)?;

    debug!(stage = ?Stage::ValidateTarget, symbol = %table.symbol(id).name, "rename");
    let symbol = table.symbol(id);
    if symbol.kind == SymbolKind::Constant {
        return Err(RenameError::CannotRenameConstant(symbol.name.clone()));
    }

    Ok(Some(PrepareRename {
        range,
        placeholder: symbol.name.clone(),
    }))
}

// =============================================================================
// EDITS
// =============================================================================

/// Full edit set renaming the symbol under `offset` to `new_name`.
///
/// Returns None when there is no renameable symbol at the offset or
/// the new name is not a usable identifier. The returned edits cover
/// every occurrence; they are applied together or not at all.
pub fn provide_rename_edits(
    session: &Session,
    offset: usize,
    new_name: &str,
) -> Option<Vec<TextEdit>> {
    debug!(offset, new_name, stage = ?Stage::Prepare, "rename");
    let table = SymbolTable::build(session.ast());
    let (id, _) = target_at(&table, offset)?;

    debug!(stage = ?Stage::ValidateTarget, symbol = %table.symbol(id).name, "rename");
    if table.symbol(id).kind == SymbolKind::Constant {
        return None;
    }

    debug!(stage = ?Stage::ComputeReferences, "rename");
    let occurrences = table.references(id);

    debug!(stage = ?Stage::ValidateNewName, "rename");
    if config::constants::is_reserved_keyword(new_name)
        || !config::constants::is_valid_identifier(new_name)
    {
        debug!(new_name, "rejected rename target name");
        return None;
    }

    debug!(stage = ?Stage::EmitEdits, count = occurrences.len(), "rename");
    Some(
        occurrences
            .iter()
            .map(|range| TextEdit {
                range: *range,
                new_text: new_name.to_string(),
            })
            .collect(),
    )
}

/// Apply an edit set to a source string. Edits are disjoint; applying
/// back-to-front keeps earlier offsets valid.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> String {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|edit| edit.range.start.byte);

    let mut result = source.to_string();
    for edit in sorted.iter().rev() {
        result.replace_range(edit.range.start.byte..edit.range.end.byte, &edit.new_text);
    }
    result
}

/// The symbol covering `offset` together with the covering occurrence
/// range.
fn target_at(table: &SymbolTable, offset: usize) -> Option<(SymbolId, SourceLocation)> {
    let id = table.symbol_at(offset)?;
    let range = table
        .references(id)
        .iter()
        .copied()
        .find(|loc| loc.contains(offset))?;
    Some((id, range))
}

// =============================================================================
// TESTS
// =============================================================================
