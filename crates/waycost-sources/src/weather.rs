//! Exposure to bad weather.

use log::debug;
use waycost_core::{CellIndex, Cost, CostSettings, WorldView};
use waycost_source::{CellRule, SourceKind};

/// Charges `WeatherCost` on unroofed cells while the weather is bad.
///
/// Weather changes carry no per-cell delta. The host calls
/// [`CostSource::poll`](waycost_source::CostSource::poll) on its weather
/// tick; when the bad/not-bad state flips the source dirties the whole
/// grid. The state it compares against is the one the last full compute
/// saw, whatever triggered that compute. Roof edits are precise per-cell
/// changes.
#[derive(Clone, Debug)]
pub struct WeatherRule {
    cost: Cost,
    last_bad: bool,
}

impl WeatherRule {
    /// Rule reading its knob from `settings`.
    pub fn new(settings: &CostSettings) -> Self {
        Self {
            cost: settings.weather_cost,
            last_bad: false,
        }
    }
}

impl CellRule for WeatherRule {
    /// Whether the weather was bad when the recompute started.
    type Frame = bool;

    fn kind(&self) -> SourceKind {
        SourceKind::Weather
    }

    fn prepare(&self, world: &dyn WorldView) -> bool {
        world.weather().is_bad()
    }

    fn cost_at(&self, bad: &bool, world: &dyn WorldView, cell: CellIndex) -> Cost {
        if *bad && !world.is_roofed(cell) {
            self.cost
        } else {
            0
        }
    }

    fn poll(&mut self, world: &dyn WorldView) -> bool {
        let bad = world.weather().is_bad();
        if bad == self.last_bad {
            return false;
        }
        debug!("weather turned {}", if bad { "bad" } else { "fair" });
        self.last_bad = bad;
        true
    }

    fn computed(&mut self, bad: &bool) {
        self.last_bad = *bad;
    }

    fn reconfigure(&mut self, settings: &CostSettings) {
        self.cost = settings.weather_cost;
    }
}
