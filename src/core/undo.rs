//! Memento-based undo/redo stacks.
//!
//! Each memento is a full value snapshot of the history store, so undo
//! and redo are plain swaps with no per-action inverse logic. Snapshots
//! are independent of later mutations.

use super::error::CalcError;
use super::history::History;

/// Two stacks of history snapshots with branch-cut semantics.
///
/// Every mutating action outside undo/redo records the pre-mutation
/// state with [`save`](UndoManager::save), which also clears the redo
/// stack: once a new action is taken, the abandoned redo branch is
/// gone. The undo stack is bounded; when it overflows, the oldest
/// snapshot at the bottom is discarded.
#[derive(Clone, Debug, Default)]
pub struct UndoManager {
    undo_stack: Vec<History>,
    redo_stack: Vec<History>,
    max_depth: usize,
}

impl UndoManager {
    /// Create a manager whose undo stack holds at most `max_depth`
    /// snapshots (clamped to at least one).
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Record the pre-mutation state and cut the redo branch.
    pub fn save(&mut self, snapshot: History) {
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
    }

    /// Pop the most recent snapshot, moving `current` onto the redo
    /// stack. Fails with [`CalcError::NothingToUndo`] without touching
    /// either stack.
    pub fn undo(&mut self, current: History) -> Result<History, CalcError> {
        let previous = self.undo_stack.pop().ok_or(CalcError::NothingToUndo)?;
        self.redo_stack.push(current);
        Ok(previous)
    }

    /// Inverse of [`undo`](UndoManager::undo): pop the redo stack,
    /// moving `current` back onto the undo stack.
    pub fn redo(&mut self, current: History) -> Result<History, CalcError> {
        let next = self.redo_stack.pop().ok_or(CalcError::NothingToRedo)?;
        self.undo_stack.push(current);
        Ok(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
