//! Bounded per-source log of published changes.
//!
//! Aggregators never subscribe to sources. Instead each source stamps every
//! recompute with a new revision and appends what changed to its journal.
//! An aggregator remembers the last revision it merged per source and, on
//! its next read, pulls everything newer. A cursor that has fallen behind
//! the retained window degrades to a whole-grid merge, so a slow reader
//! costs CPU but never correctness.

use std::collections::VecDeque;

use waycost_core::{CellIndex, CellSet};

/// One published change batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    /// These cells may hold new costs.
    Cells(Vec<CellIndex>),
    /// Any cell may hold a new cost.
    All,
}

/// Outcome of pulling a journal since a cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Catchup {
    /// Nothing was published since the cursor.
    UpToDate,
    /// The changed cells were added to the caller's set.
    Partial,
    /// The caller must treat every cell as changed.
    Full,
}

/// Bounded ring of `(revision, change)` entries.
#[derive(Clone, Debug)]
pub struct ChangeJournal {
    entries: VecDeque<(u64, Change)>,
    capacity: usize,
}

impl ChangeJournal {
    /// Create a journal retaining at most `capacity` batches.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "journal capacity must be non-zero");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of retained batches.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of retained batches.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a batch stamped `revision`, evicting the oldest if full.
    ///
    /// Revisions must be strictly increasing.
    pub fn push(&mut self, revision: u64, change: Change) {
        debug_assert!(self.entries.back().is_none_or(|(r, _)| *r < revision));
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((revision, change));
    }

    /// Collect every change after `since` up to `current` into `out`.
    pub fn collect_since(&self, since: u64, current: u64, out: &mut CellSet) -> Catchup {
        if since >= current {
            return Catchup::UpToDate;
        }
        match self.entries.front() {
            Some((oldest, _)) if *oldest <= since + 1 => {}
            _ => return Catchup::Full,
        }
        for (revision, change) in &self.entries {
            if *revision <= since {
                continue;
            }
            match change {
                Change::All => return Catchup::Full,
                Change::Cells(cells) => out.extend(cells.iter().copied()),
            }
        }
        Catchup::Partial
    }
}
