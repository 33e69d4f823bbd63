//! Player-declared avoidance areas.

use waycost_core::{saturating_sum, AvoidLevel, CellIndex, Cost, CostSettings, WorldView};
use waycost_source::{CellRule, SourceKind};

/// Sums the knobs of every avoidance tier whose area contains a cell.
///
/// Tiers stack: a cell inside both the low and the high area costs both
/// knobs, saturating. Painting or erasing cells is a precise change;
/// creating, deleting, renaming, inverting or clearing an area is not, and
/// must be reported as a whole-grid change.
#[derive(Clone, Debug)]
pub struct AvoidAreaRule {
    costs: [Cost; 3],
}

impl AvoidAreaRule {
    /// Rule reading its knobs from `settings`.
    pub fn new(settings: &CostSettings) -> Self {
        Self {
            costs: AvoidLevel::ALL.map(|l| settings.area_cost(l)),
        }
    }
}

impl CellRule for AvoidAreaRule {
    type Frame = ();

    fn kind(&self) -> SourceKind {
        SourceKind::AvoidArea
    }

    fn prepare(&self, _world: &dyn WorldView) {}

    fn cost_at(&self, _: &(), world: &dyn WorldView, cell: CellIndex) -> Cost {
        saturating_sum(
            AvoidLevel::ALL
                .iter()
                .zip(self.costs)
                .filter(|(level, _)| world.in_avoid_area(**level, cell))
                .map(|(_, cost)| cost),
        )
    }

    fn reconfigure(&mut self, settings: &CostSettings) {
        *self = Self::new(settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waycost_test_utils::MockWorld;

    #[test]
    fn tiers_stack() {
        let mut world = MockWorld::new(3);
        world.create_area(AvoidLevel::Low);
        world.create_area(AvoidLevel::High);
        world.set_area_cell(AvoidLevel::Low, 0, true);
        world.set_area_cell(AvoidLevel::Low, 1, true);
        world.set_area_cell(AvoidLevel::High, 1, true);
        let rule = AvoidAreaRule::new(&CostSettings::default());
        let costs: Vec<_> = (0..3).map(|c| rule.cost_at(&(), &world, c)).collect();
        assert_eq!(costs, vec![20, 520, 0]);
    }

    #[test]
    fn stacking_saturates() {
        let mut world = MockWorld::new(1);
        for level in AvoidLevel::ALL {
            world.create_area(level);
            world.set_area_cell(level, 0, true);
        }
        let settings = CostSettings {
            area_avoid_low_cost: 30_000,
            area_avoid_medium_cost: 30_000,
            area_avoid_high_cost: 30_000,
            ..CostSettings::default()
        };
        let rule = AvoidAreaRule::new(&settings);
        assert_eq!(rule.cost_at(&(), &world, 0), Cost::MAX);
    }

    #[test]
    fn missing_area_costs_nothing() {
        let world = MockWorld::new(1);
        let rule = AvoidAreaRule::new(&CostSettings::default());
        assert_eq!(rule.cost_at(&(), &world, 0), 0);
    }
}
