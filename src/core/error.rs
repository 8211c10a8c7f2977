//! Core calculator error types.

use thiserror::Error;

/// Errors produced by operation evaluation and history transitions.
///
/// Every variant is recoverable: a failed call leaves the history store
/// and both undo/redo stacks exactly as they were before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// The requested name is not in the operation registry.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// An operation precondition was violated (division by zero,
    /// root of a negative number, and so on).
    #[error("{0}")]
    Domain(String),

    /// `undo` was called with an empty undo stack.
    #[error("nothing to undo")]
    NothingToUndo,

    /// `redo` was called with an empty redo stack.
    #[error("nothing to redo")]
    NothingToRedo,
}
