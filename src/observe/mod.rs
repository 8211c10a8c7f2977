//! Change notification for history mutations.
//!
//! Observers subscribe to the calculator and are invoked synchronously,
//! in registration order, after every committed history mutation. An
//! observer failure never rolls the mutation back; it is caught at the
//! call site and surfaced as an [`ObserverWarning`].

use crate::core::Calculation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of mutation just committed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// A new calculation was appended.
    Recorded,
    /// The history was emptied.
    Cleared,
    /// The history was replaced from external entries.
    Loaded,
    /// A snapshot was restored from the undo stack.
    Undone,
    /// A snapshot was restored from the redo stack.
    Redone,
}

impl HistoryEvent {
    /// Stable lowercase tag for logging and display.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Recorded => "recorded",
            Self::Cleared => "cleared",
            Self::Loaded => "loaded",
            Self::Undone => "undone",
            Self::Redone => "redone",
        }
    }
}

impl fmt::Display for HistoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error type observers may return; boxed so persistence and logging
/// observers can fail with their own error enums.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// A subscriber notified after every committed history mutation.
///
/// Observers receive a read-only snapshot of the full current history
/// plus the event tag. They must not assume anything about call
/// ordering beyond "after commit, in registration order".
pub trait HistoryObserver {
    /// React to a committed mutation.
    fn on_event(&mut self, event: HistoryEvent, snapshot: &[Calculation])
        -> Result<(), ObserverError>;

    /// Short name used in warnings when the observer fails.
    fn name(&self) -> &str {
        "observer"
    }
}

/// Non-fatal report that an observer failed after a mutation committed.
#[derive(Debug)]
pub struct ObserverWarning {
    /// The event the observer was reacting to
    pub event: HistoryEvent,
    /// Name of the failing observer
    pub observer: String,
    /// The observer's own error, flattened for display
    pub message: String,
}

impl fmt::Display for ObserverWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} failed on {} event: {}",
            self.observer, self.event, self.message
        )
    }
}

/// Logging observer: emits one trace line per history mutation.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceObserver;

impl HistoryObserver for TraceObserver {
    fn on_event(
        &mut self,
        event: HistoryEvent,
        snapshot: &[Calculation],
    ) -> Result<(), ObserverError> {
        match snapshot.last() {
            Some(latest) => {
                tracing::info!(event = event.tag(), entries = snapshot.len(), %latest, "history changed")
            }
            None => tracing::info!(event = event.tag(), entries = 0usize, "history changed"),
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "trace observer"
    }
}
