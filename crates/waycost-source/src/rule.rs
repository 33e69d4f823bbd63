//! Sources defined by a pure per-cell rule.

use log::trace;
use waycost_core::{CellIndex, Cost, CostSettings, WorldView};

use crate::kind::SourceKind;
use crate::source::CostSource;
use crate::state::SourceState;

/// A contributor whose cost at a cell depends only on world state at that
/// cell, its knobs, and optional grid-wide context.
///
/// `prepare` is evaluated once per recompute to capture grid-wide context
/// (such as the weather) so `cost_at` stays a cheap per-cell lookup.
/// `cost_at` must return zero for cells with missing world data.
pub trait CellRule: Send {
    /// Grid-wide context captured per recompute.
    type Frame;

    /// Which contributor this rule implements.
    fn kind(&self) -> SourceKind;

    /// Capture grid-wide context.
    fn prepare(&self, world: &dyn WorldView) -> Self::Frame;

    /// Cost of `cell`.
    fn cost_at(&self, frame: &Self::Frame, world: &dyn WorldView, cell: CellIndex) -> Cost;

    /// Inspect unnotified world state. Returns `true` if every cell must be
    /// recomputed. Default: never.
    fn poll(&mut self, _world: &dyn WorldView) -> bool {
        false
    }

    /// Called after every full recompute with the frame it used, so the
    /// rule can track the context its buffer now reflects. Default: no-op.
    fn computed(&mut self, _frame: &Self::Frame) {}

    /// Adopt new knob values.
    fn reconfigure(&mut self, settings: &CostSettings);
}

/// [`CostSource`] implementation for any [`CellRule`].
pub struct RuleSource<R> {
    rule: R,
    state: SourceState,
}

impl<R: CellRule> RuleSource<R> {
    /// Wrap `rule` with fresh state for a grid of `cell_count` cells.
    pub fn new(rule: R, cell_count: usize, journal_capacity: usize) -> Self {
        Self {
            rule,
            state: SourceState::new(cell_count, journal_capacity),
        }
    }

    /// The wrapped rule.
    pub fn rule(&self) -> &R {
        &self.rule
    }
}

impl<R: CellRule> CostSource for RuleSource<R> {
    fn kind(&self) -> SourceKind {
        self.rule.kind()
    }

    fn state(&self) -> &SourceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SourceState {
        &mut self.state
    }

    fn compute_all(&mut self, world: &dyn WorldView) {
        let frame = self.rule.prepare(world);
        let rule = &self.rule;
        self.state
            .recompute_all(|cell| rule.cost_at(&frame, world, cell));
        self.rule.computed(&frame);
        trace!(
            "{}: full compute of {} cells",
            self.rule.kind(),
            self.state.cell_count()
        );
    }

    fn update_incrementally(&mut self, world: &dyn WorldView, changed: &[CellIndex]) -> bool {
        if self.state.needs_full() {
            self.compute_all(world);
            return true;
        }
        let frame = self.rule.prepare(world);
        let rule = &self.rule;
        let had_extra = self
            .state
            .recompute_cells(changed, |cell| rule.cost_at(&frame, world, cell));
        trace!(
            "{}: incremental update, {} reported, extra={had_extra}",
            self.rule.kind(),
            changed.len()
        );
        had_extra
    }

    fn poll(&mut self, world: &dyn WorldView) {
        if self.rule.poll(world) {
            self.state.mark_all();
        }
    }

    fn reconfigure(&mut self, settings: &CostSettings) {
        self.rule.reconfigure(settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waycost_core::DoorPriority;

    struct Doors(Vec<Option<DoorPriority>>);

    impl WorldView for Doors {
        fn cell_count(&self) -> usize {
            self.0.len()
        }

        fn door_at(&self, cell: CellIndex) -> Option<DoorPriority> {
            self.0.get(cell).copied().flatten()
        }
    }

    struct DoorRule;

    impl CellRule for DoorRule {
        type Frame = ();

        fn kind(&self) -> SourceKind {
            SourceKind::Obstacle
        }

        fn prepare(&self, _world: &dyn WorldView) {}

        fn cost_at(&self, _: &(), world: &dyn WorldView, cell: CellIndex) -> Cost {
            match world.door_at(cell) {
                Some(DoorPriority::Side) => 5,
                Some(DoorPriority::Emergency) => 9,
                _ => 0,
            }
        }

        fn reconfigure(&mut self, _settings: &CostSettings) {}
    }

    const S: Option<DoorPriority> = Some(DoorPriority::Side);
    const E: Option<DoorPriority> = Some(DoorPriority::Emergency);

    #[test]
    fn first_update_is_a_full_compute() {
        let world = Doors(vec![None, S, E]);
        let mut src = RuleSource::new(DoorRule, 3, 4);
        assert!(src.update_incrementally(&world, &[]));
        assert_eq!(src.grid().to_vec(), vec![0, 5, 9]);
        assert_eq!(src.state().stats().full_computes, 1);
    }

    #[test]
    fn only_reported_cells_are_recomputed() {
        let mut src = RuleSource::new(DoorRule, 3, 4);
        src.compute_all(&Doors(vec![None, S, E]));
        let world = Doors(vec![E, E, None]);
        assert!(!src.update_incrementally(&world, &[1]));
        // Cells 0 and 2 are stale until someone reports them.
        assert_eq!(src.grid().to_vec(), vec![0, 9, 9]);
    }

    #[test]
    fn mark_all_turns_update_into_full_compute() {
        let mut src = RuleSource::new(DoorRule, 3, 4);
        src.compute_all(&Doors(vec![None, S, E]));
        src.mark_all();
        assert!(src.update_incrementally(&Doors(vec![S, S, S]), &[]));
        assert_eq!(src.grid().to_vec(), vec![5, 5, 5]);
        assert_eq!(src.state().stats().full_computes, 2);
    }
}
