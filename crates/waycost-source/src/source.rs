//! The [`CostSource`] trait.

use waycost_arena::CostGrid;
use waycost_core::{CellIndex, CostSettings, WorldView};

use crate::kind::SourceKind;
use crate::state::SourceState;

/// One independent contributor to a grid's path costs.
///
/// # Contract
///
/// - `compute_all` rebuilds the whole buffer from `world`. It only writes
///   the source's own buffer and bookkeeping, so distinct sources may
///   compute concurrently on worker threads.
/// - `update_incrementally` recomputes the caller's reported cells plus any
///   cells the source tracked itself. If the source is uninitialized or was
///   marked whole-grid dirty it performs a full compute instead. It returns
///   `true` when more changed than the caller's set implies.
/// - After either call the dirty state is clear and the buffer equals what
///   a fresh `compute_all` would produce for every cell.
/// - Calls on the same source never overlap; `&mut self` makes that a
///   compile-time fact.
///
/// # Object safety
///
/// The registry stores sources as `Vec<Box<dyn CostSource>>`.
pub trait CostSource: Send {
    /// Which contributor this is.
    fn kind(&self) -> SourceKind;

    /// Shared bookkeeping.
    fn state(&self) -> &SourceState;

    /// Shared bookkeeping, mutably.
    fn state_mut(&mut self) -> &mut SourceState;

    /// Rebuild every cell from `world`.
    fn compute_all(&mut self, world: &dyn WorldView);

    /// Recompute `changed` plus self-tracked cells.
    fn update_incrementally(&mut self, world: &dyn WorldView, changed: &[CellIndex]) -> bool;

    /// Check world state that changes without per-cell notifications.
    ///
    /// Called by the host on its own schedule. Sources that detect a change
    /// mark themselves whole-grid dirty. Default: no-op.
    fn poll(&mut self, _world: &dyn WorldView) {}

    /// Adopt new knob values. The caller marks the source dirty afterwards.
    fn reconfigure(&mut self, _settings: &CostSettings) {}

    /// Read view of this source's buffer.
    fn grid(&self) -> CostGrid {
        self.state().grid()
    }

    /// Record a change at `cell` the caller will not report.
    fn mark_cell(&mut self, cell: CellIndex) {
        self.state_mut().mark_cell(cell);
    }

    /// Record that every cell may have changed.
    fn mark_all(&mut self) {
        self.state_mut().mark_all();
    }
}
