//! Bounded, ordered calculation history.

use super::calculation::Calculation;
use serde::{Deserialize, Serialize};

/// Ordered, size-bounded sequence of calculations.
///
/// Insertion order is chronological order. The store holds at most
/// `capacity` entries; pushing past the bound evicts the oldest entry
/// (FIFO). Eviction happens only on [`push`](History::push) - restoring
/// a snapshot via undo/redo or replacing the contents never evicts.
///
/// # Example
///
/// ```rust
/// use reckon::core::{Calculation, History};
///
/// let mut history = History::new(2);
/// history.push(Calculation::new("add", 1.0, 1.0, 2.0));
/// history.push(Calculation::new("add", 2.0, 2.0, 4.0));
/// history.push(Calculation::new("add", 3.0, 3.0, 6.0));
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.entries()[0].operand1, 2.0); // oldest evicted
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<Calculation>,
    capacity: usize,
}

impl History {
    /// Create an empty history bounded at `capacity` entries.
    ///
    /// A capacity of zero is clamped to one; the bound is always >= 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Append an entry, evicting the oldest if the bound is exceeded.
    pub fn push(&mut self, entry: Calculation) {
        self.entries.push(entry);
        while self.entries.len() > self.capacity {
            self.entries.remove(0);
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace the contents with `entries`, keeping the capacity bound.
    ///
    /// If more entries are supplied than fit, only the newest
    /// `capacity` entries are kept.
    pub fn replace(&mut self, entries: Vec<Calculation>) {
        self.entries = entries;
        let len = self.entries.len();
        if len > self.capacity {
            self.entries.drain(..len - self.capacity);
        }
    }

    /// All entries in chronological order.
    pub fn entries(&self) -> &[Calculation] {
        &self.entries
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The configured maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
