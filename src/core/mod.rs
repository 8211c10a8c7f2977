//! Core calculation-history state machine.
//!
//! This module contains the in-memory core of the evaluator:
//! - Operation registry and domain validation
//! - Immutable calculation entries
//! - Bounded history store with FIFO eviction
//! - Memento-based undo/redo stacks
//! - The owning calculator facade
//!
//! Everything here is synchronous and purely in-memory; persistence
//! and logging live behind the observer seam in [`crate::observe`].

mod calculation;
mod calculator;
mod error;
mod history;
mod operation;
mod undo;

pub use calculation::Calculation;
pub use calculator::Calculator;
pub use error::CalcError;
pub use history::History;
pub use operation::{Operation, OperationRegistry};
pub use undo::UndoManager;
