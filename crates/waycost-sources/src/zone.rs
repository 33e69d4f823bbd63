//! Growing zones.

use waycost_core::{CellIndex, Cost, CostSettings, TraversalCategory, WorldView, ZoneKind};
use waycost_source::{CellRule, SourceKind};

/// Charges a category's growing-zone knob on growing-zone cells.
///
/// One instance exists per category with a non-zero knob; each serves only
/// its own category.
#[derive(Clone, Debug)]
pub struct ZoneRule {
    category: TraversalCategory,
    cost: Cost,
}

impl ZoneRule {
    /// Rule for `category` reading its knob from `settings`.
    ///
    /// # Panics
    ///
    /// For [`TraversalCategory::None`], which has no growing-zone knob.
    pub fn new(category: TraversalCategory, settings: &CostSettings) -> Self {
        Self {
            category,
            cost: settings.growing_zone_cost(category),
        }
    }
}

impl CellRule for ZoneRule {
    type Frame = ();

    fn kind(&self) -> SourceKind {
        SourceKind::Zone(self.category)
    }

    fn prepare(&self, _world: &dyn WorldView) {}

    fn cost_at(&self, _: &(), world: &dyn WorldView, cell: CellIndex) -> Cost {
        match world.zone_at(cell) {
            Some(ZoneKind::Growing) => self.cost,
            _ => 0,
        }
    }

    fn reconfigure(&mut self, settings: &CostSettings) {
        self.cost = settings.growing_zone_cost(self.category);
    }
}
