//! Reckon: an arithmetic evaluator with a bounded, undoable,
//! persistent calculation history.
//!
//! The heart of the crate is the calculation-history state machine in
//! [`core`]: every successful operation is recorded as an immutable
//! [`core::Calculation`], the history is size-bounded with FIFO
//! eviction, and every mutation is undoable via full-snapshot mementos
//! with branch-cut redo semantics. Mutations fan out synchronously to
//! registered observers; persistence and logging are observers, never
//! part of the core.
//!
//! # Core Concepts
//!
//! - **Operation**: a named pure function over two operands, resolved
//!   through an open registry
//! - **History**: bounded chronological store of calculation entries
//! - **Memento**: immutable full snapshot powering undo/redo
//! - **Observer**: synchronous subscriber notified after each commit
//!
//! # Example
//!
//! ```rust
//! use reckon::core::{CalcError, Calculator};
//!
//! let mut calc = Calculator::new(100);
//! calc.evaluate("add", 15.0, 7.0)?;
//! calc.evaluate("power", 2.0, 8.0)?;
//!
//! calc.undo()?;
//! assert_eq!(calc.snapshot().len(), 1);
//! calc.redo()?;
//! assert_eq!(calc.snapshot()[1].result, 256.0);
//! # Ok::<(), CalcError>(())
//! ```

pub mod config;
pub mod core;
pub mod observe;
pub mod persist;
pub mod repl;

// Re-export commonly used types
pub use config::CalculatorConfig;
pub use core::{CalcError, Calculation, Calculator, History, OperationRegistry};
pub use observe::{HistoryEvent, HistoryObserver, ObserverWarning};
