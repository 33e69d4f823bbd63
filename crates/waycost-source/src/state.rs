//! Bookkeeping shared by every cost source.

use log::warn;
use waycost_arena::{CostBuffer, CostGrid};
use waycost_core::{CellIndex, CellSet, Cost};

use crate::journal::{Catchup, Change, ChangeJournal};

/// Per-source recompute counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SourceStats {
    /// Completed whole-grid recomputes.
    pub full_computes: u64,
    /// Completed incremental updates (including ones that found nothing to do).
    pub incremental_updates: u64,
    /// Cells evaluated across all recomputes.
    pub cells_recomputed: u64,
}

/// The buffer and dirty state every cost source carries.
///
/// Holds the source's [`CostBuffer`], the "extra changed" cells reported
/// through [`mark_cell`](Self::mark_cell) by producers the caller does not
/// know about, the whole-grid flag set by [`mark_all`](Self::mark_all), and
/// the revision counter plus [`ChangeJournal`] aggregators pull from.
#[derive(Debug)]
pub struct SourceState {
    buffer: CostBuffer,
    extra: CellSet,
    all_changed: bool,
    initialized: bool,
    revision: u64,
    journal: ChangeJournal,
    stats: SourceStats,
}

impl SourceState {
    /// Fresh state for a grid of `cell_count` cells.
    ///
    /// A fresh source is uninitialized, so its first update is a full
    /// recompute regardless of what the caller reports.
    pub fn new(cell_count: usize, journal_capacity: usize) -> Self {
        Self {
            buffer: CostBuffer::new(cell_count),
            extra: CellSet::with_cell_count(cell_count),
            all_changed: false,
            initialized: false,
            revision: 0,
            journal: ChangeJournal::new(journal_capacity),
            stats: SourceStats::default(),
        }
    }

    /// Number of cells in the source's grid.
    pub fn cell_count(&self) -> usize {
        self.buffer.len()
    }

    /// A read view of the source's buffer.
    pub fn grid(&self) -> CostGrid {
        self.buffer.share()
    }

    /// Current cost at `cell`.
    pub fn cost(&self, cell: CellIndex) -> Cost {
        self.buffer.get(cell)
    }

    /// Record that `cell` changed in a way the caller may not report.
    ///
    /// Out-of-range cells are logged and dropped.
    pub fn mark_cell(&mut self, cell: CellIndex) {
        if cell >= self.cell_count() {
            warn!(
                "dropping change for cell {cell} outside grid of {} cells",
                self.cell_count()
            );
            return;
        }
        if !self.all_changed {
            self.extra.insert(cell);
        }
    }

    /// [`mark_cell`](Self::mark_cell) for every cell of `cells`.
    pub fn mark_cells<I: IntoIterator<Item = CellIndex>>(&mut self, cells: I) {
        for cell in cells {
            self.mark_cell(cell);
        }
    }

    /// Record that every cell may have changed.
    pub fn mark_all(&mut self) {
        self.all_changed = true;
        self.extra.clear();
    }

    /// Whether the next update must recompute every cell.
    pub fn needs_full(&self) -> bool {
        !self.initialized || self.all_changed
    }

    /// Whether changes beyond the caller's report are pending.
    pub fn has_extra_changes(&self) -> bool {
        self.all_changed || !self.extra.is_empty()
    }

    /// Whether the first full recompute has happened.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Revision of the most recent published change; 0 before any.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Recompute counters.
    pub fn stats(&self) -> SourceStats {
        self.stats
    }

    /// Pull changes published after revision `since` into `out`.
    pub fn collect_since(&self, since: u64, out: &mut CellSet) -> Catchup {
        self.journal.collect_since(since, self.revision, out)
    }

    /// Rewrite every cell with `cost_at` and publish a whole-grid change.
    pub fn recompute_all(&mut self, mut cost_at: impl FnMut(CellIndex) -> Cost) {
        let n = self.cell_count();
        for cell in 0..n {
            self.buffer.set(cell, cost_at(cell));
        }
        self.extra.clear();
        self.all_changed = false;
        self.initialized = true;
        self.stats.full_computes += 1;
        self.stats.cells_recomputed += n as u64;
        self.publish(Change::All);
    }

    /// Rewrite `reported` plus the pending extra cells with `cost_at`.
    ///
    /// Only cells whose cost actually moved are published. Returns whether
    /// extra cells were pending. Must not be called while
    /// [`needs_full`](Self::needs_full) holds.
    pub fn recompute_cells(
        &mut self,
        reported: &[CellIndex],
        mut cost_at: impl FnMut(CellIndex) -> Cost,
    ) -> bool {
        debug_assert!(!self.needs_full());
        let n = self.cell_count();
        let extra = self.extra.take();
        let had_extra = !extra.is_empty();

        let mut visited = CellSet::new();
        let mut moved = Vec::new();
        for &cell in reported.iter().chain(extra.iter()) {
            if cell >= n || !visited.insert(cell) {
                continue;
            }
            let cost = cost_at(cell);
            if cost != self.buffer.get(cell) {
                self.buffer.set(cell, cost);
                moved.push(cell);
            }
        }

        self.stats.incremental_updates += 1;
        self.stats.cells_recomputed += visited.len() as u64;
        if !moved.is_empty() {
            self.publish(Change::Cells(moved));
        }
        had_extra
    }

    fn publish(&mut self, change: Change) {
        self.revision += 1;
        self.journal.push(self.revision, change);
    }
}
