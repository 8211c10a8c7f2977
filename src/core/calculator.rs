//! The calculator facade: single owner of the history store, the
//! undo/redo stacks, the operation registry, and the observer list.
//!
//! All mutation flows through this type, in validate-before-mutate
//! order: an operation is resolved and computed before anything is
//! touched, so a failed call leaves every piece of state unchanged.

use super::calculation::Calculation;
use super::error::CalcError;
use super::history::History;
use super::operation::OperationRegistry;
use super::undo::UndoManager;
use crate::config::CalculatorConfig;
use crate::observe::{HistoryEvent, HistoryObserver, ObserverWarning};

/// Arithmetic evaluator with bounded, undoable history.
///
/// # Example
///
/// ```rust
/// use reckon::core::Calculator;
///
/// let mut calc = Calculator::new(100);
/// calc.evaluate("add", 15.0, 7.0).unwrap();
/// calc.evaluate("power", 2.0, 8.0).unwrap();
///
/// calc.undo().unwrap();
/// assert_eq!(calc.snapshot().len(), 1);
///
/// calc.redo().unwrap();
/// assert_eq!(calc.snapshot().len(), 2);
/// assert_eq!(calc.snapshot()[1].result, 256.0);
/// ```
pub struct Calculator {
    registry: OperationRegistry,
    history: History,
    undo: UndoManager,
    observers: Vec<Box<dyn HistoryObserver>>,
    warnings: Vec<ObserverWarning>,
}

const DEFAULT_UNDO_DEPTH: usize = 50;

impl Calculator {
    /// Create a calculator whose history holds at most
    /// `max_history_size` entries, with the default undo depth and the
    /// builtin operation set.
    pub fn new(max_history_size: usize) -> Self {
        Self::with_limits(max_history_size, DEFAULT_UNDO_DEPTH)
    }

    /// Create a calculator with explicit history and undo bounds.
    pub fn with_limits(max_history_size: usize, max_undo_depth: usize) -> Self {
        Self {
            registry: OperationRegistry::with_builtins(),
            history: History::new(max_history_size),
            undo: UndoManager::new(max_undo_depth),
            observers: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a calculator from a loaded configuration.
    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self::with_limits(config.max_history_size, config.max_undo_depth)
    }

    /// Register an observer; observers are notified in registration
    /// order after every committed mutation.
    pub fn subscribe(&mut self, observer: Box<dyn HistoryObserver>) {
        self.observers.push(observer);
    }

    /// The operation registry, for name lookups and display.
    pub fn operations(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Register an additional operation.
    pub fn register_operation<F>(&mut self, name: &str, f: F)
    where
        F: Fn(f64, f64) -> Result<f64, CalcError> + Send + Sync + 'static,
    {
        self.registry.register(name, f);
    }

    /// Resolve `name`, compute, and record the result as a new entry.
    ///
    /// Resolution and domain validation happen before any state is
    /// mutated; on error the history and both stacks are untouched.
    pub fn evaluate(&mut self, name: &str, a: f64, b: f64) -> Result<Calculation, CalcError> {
        let result = self.registry.resolve(name)?.apply(a, b)?;
        let entry = Calculation::new(name, a, b, result);
        self.record(entry.clone());
        Ok(entry)
    }

    /// Append an already-built entry, evicting the oldest if the
    /// history is at capacity.
    pub fn record(&mut self, entry: Calculation) {
        let before = self.history.clone();
        self.history.push(entry);
        self.undo.save(before);
        self.notify(HistoryEvent::Recorded);
    }

    /// Empty the history. Undoable like any other mutation.
    pub fn clear(&mut self) {
        let before = self.history.clone();
        self.history.clear();
        self.undo.save(before);
        self.notify(HistoryEvent::Cleared);
    }

    /// Replace the history with externally loaded entries.
    pub fn load(&mut self, entries: Vec<Calculation>) {
        let before = self.history.clone();
        self.history.replace(entries);
        self.undo.save(before);
        self.notify(HistoryEvent::Loaded);
    }

    /// Restore the most recent pre-mutation snapshot.
    pub fn undo(&mut self) -> Result<(), CalcError> {
        self.history = self.undo.undo(self.history.clone())?;
        self.notify(HistoryEvent::Undone);
        Ok(())
    }

    /// Re-apply the most recently undone state.
    pub fn redo(&mut self) -> Result<(), CalcError> {
        self.history = self.undo.redo(self.history.clone())?;
        self.notify(HistoryEvent::Redone);
        Ok(())
    }

    /// Read-only view of the current history, oldest first.
    pub fn snapshot(&self) -> &[Calculation] {
        self.history.entries()
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// Take the observer warnings accumulated since the last drain.
    ///
    /// Warnings are non-fatal: the mutations they describe have already
    /// committed and stand.
    pub fn drain_warnings(&mut self) -> Vec<ObserverWarning> {
        std::mem::take(&mut self.warnings)
    }

    /// Fan the event out to every observer, isolating failures.
    fn notify(&mut self, event: HistoryEvent) {
        let snapshot = self.history.entries();
        for observer in &mut self.observers {
            if let Err(err) = observer.on_event(event, snapshot) {
                let warning = ObserverWarning {
                    event,
                    observer: observer.name().to_string(),
                    message: err.to_string(),
                };
                tracing::warn!(%warning, "observer failed; history mutation stands");
                self.warnings.push(warning);
            }
        }
    }
}
