//! Doors with a raised traffic priority.

use waycost_core::{CellIndex, Cost, CostSettings, DoorPriority, WorldView};
use waycost_source::{CellRule, SourceKind};

/// Charges the priority cost of the door covering a cell.
///
/// Multi-cell doors report their priority on every footprint cell, so a
/// priority change is reported for the whole footprint.
#[derive(Clone, Debug)]
pub struct ObstacleRule {
    side: Cost,
    emergency: Cost,
}

impl ObstacleRule {
    /// Rule reading its knobs from `settings`.
    pub fn new(settings: &CostSettings) -> Self {
        Self {
            side: settings.door_cost(DoorPriority::Side),
            emergency: settings.door_cost(DoorPriority::Emergency),
        }
    }
}

impl CellRule for ObstacleRule {
    type Frame = ();

    fn kind(&self) -> SourceKind {
        SourceKind::Obstacle
    }

    fn prepare(&self, _world: &dyn WorldView) {}

    fn cost_at(&self, _: &(), world: &dyn WorldView, cell: CellIndex) -> Cost {
        match world.door_at(cell) {
            Some(DoorPriority::Side) => self.side,
            Some(DoorPriority::Emergency) => self.emergency,
            Some(DoorPriority::Normal) | None => 0,
        }
    }

    fn reconfigure(&mut self, settings: &CostSettings) {
        *self = Self::new(settings);
    }
}
