//! Terrain that tracks filth into clean areas.

use waycost_core::{CellIndex, Cost, CostSettings, WorldView};
use waycost_source::{CellRule, SourceKind};

/// Charges `DirtyCost` on every cell whose terrain generates filth.
#[derive(Clone, Debug)]
pub struct TerrainHazardRule {
    cost: Cost,
}

impl TerrainHazardRule {
    /// Rule reading its knob from `settings`.
    pub fn new(settings: &CostSettings) -> Self {
        Self {
            cost: settings.dirty_cost,
        }
    }
}

impl CellRule for TerrainHazardRule {
    type Frame = ();

    fn kind(&self) -> SourceKind {
        SourceKind::TerrainHazard
    }

    fn prepare(&self, _world: &dyn WorldView) {}

    fn cost_at(&self, _: &(), world: &dyn WorldView, cell: CellIndex) -> Cost {
        match world.terrain_at(cell) {
            Some(terrain) if terrain.generates_filth => self.cost,
            _ => 0,
        }
    }

    fn reconfigure(&mut self, settings: &CostSettings) {
        self.cost = settings.dirty_cost;
    }
}
