#![forbid(unsafe_code)]

//! Bounded change history for debugging.
//!
//! [`ChangeHistory`] keeps the most recent value changes of an instrumented
//! variable. Instead of evicting one entry per push, it lets the buffer grow
//! to twice [`HISTORY_SIZE`] and then drops the oldest [`HISTORY_SIZE`]
//! entries in one batch, so at least `HISTORY_SIZE` entries are always
//! retained once that many changes have happened.
//!
//! The history is a debugging aid only. Variable logic never reads it.
//!
//! # Example
//!
//! ```
//! use varbind_core::history::{ChangeHistory, ChangeRecord, HISTORY_SIZE};
//! use std::time::Duration;
//!
//! let mut history = ChangeHistory::new();
//! for i in 0..(2 * HISTORY_SIZE) as i32 {
//!     history.push(ChangeRecord::new(Duration::ZERO, 0, i, None));
//! }
//! assert_eq!(history.len(), 2 * HISTORY_SIZE);
//!
//! history.push(ChangeRecord::new(Duration::ZERO, 0, 64, None));
//! assert_eq!(history.len(), HISTORY_SIZE + 1);
//! assert_eq!(history.total_count(), 2 * HISTORY_SIZE + 1);
//! ```

use std::time::Duration;

/// Number of entries retained after a prune.
pub const HISTORY_SIZE: usize = 32;

/// One recorded change.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord<T> {
    /// Time since the clock epoch when the change happened.
    pub elapsed: Duration,
    /// Logical frame number at the time of the change.
    pub frame: u64,
    /// Value after the change.
    pub value: T,
    /// Call-stack snapshot, when call tracing is enabled.
    pub trace: Option<String>,
}

impl<T> ChangeRecord<T> {
    /// Create a record.
    #[must_use]
    pub fn new(elapsed: Duration, frame: u64, value: T, trace: Option<String>) -> Self {
        Self {
            elapsed,
            frame,
            value,
            trace,
        }
    }
}

/// Rolling window of [`ChangeRecord`]s, pruned in batches.
#[derive(Debug, Clone)]
pub struct ChangeHistory<T> {
    records: Vec<ChangeRecord<T>>,
    total_count: usize,
}

impl<T> Default for ChangeHistory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ChangeHistory<T> {
    /// Create an empty history with room for one full window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::with_capacity(HISTORY_SIZE * 2),
            total_count: 0,
        }
    }

    /// Append a record, pruning the oldest batch first if the buffer is full.
    pub fn push(&mut self, record: ChangeRecord<T>) {
        if self.records.len() >= HISTORY_SIZE * 2 {
            self.records.drain(..HISTORY_SIZE);
        }
        self.records.push(record);
        self.total_count = self.total_count.saturating_add(1);
    }

    /// Records currently retained, oldest first.
    #[must_use]
    pub fn records(&self) -> &[ChangeRecord<T>] {
        &self.records
    }

    /// Iterate over retained records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ChangeRecord<T>> {
        self.records.iter()
    }

    /// Most recent record.
    #[must_use]
    pub fn latest(&self) -> Option<&ChangeRecord<T>> {
        self.records.last()
    }

    /// Number of retained records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records ever pushed, including pruned ones.
    #[must_use]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    /// Drop all records and reset the counter.
    pub fn clear(&mut self) {
        self.records.clear();
        self.total_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: usize) -> ChangeRecord<usize> {
        ChangeRecord::new(Duration::from_millis(value as u64), value as u64, value, None)
    }

    #[test]
    fn grows_until_double_window() {
        let mut history = ChangeHistory::new();
        for i in 0..HISTORY_SIZE * 2 {
            history.push(record(i));
        }
        assert_eq!(history.len(), HISTORY_SIZE * 2);
        assert_eq!(history.records()[0].value, 0);
    }

    #[test]
    fn prunes_oldest_batch() {
        let mut history = ChangeHistory::new();
        for i in 0..=HISTORY_SIZE * 2 {
            history.push(record(i));
        }
        assert_eq!(history.len(), HISTORY_SIZE + 1);
        assert_eq!(history.records()[0].value, HISTORY_SIZE);
        assert_eq!(history.latest().map(|r| r.value), Some(HISTORY_SIZE * 2));
        assert_eq!(history.total_count(), HISTORY_SIZE * 2 + 1);
    }

    #[test]
    fn never_exceeds_double_window() {
        let mut history = ChangeHistory::new();
        for i in 0..1000 {
            history.push(record(i));
            assert!(history.len() <= HISTORY_SIZE * 2);
        }
        assert!(history.len() >= HISTORY_SIZE);
        assert_eq!(history.total_count(), 1000);
    }

    #[test]
    fn clear_resets() {
        let mut history = ChangeHistory::new();
        history.push(record(1));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.total_count(), 0);
        assert_eq!(history.iter().count(), 0);
    }
}
