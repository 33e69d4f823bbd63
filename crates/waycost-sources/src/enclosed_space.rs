//! Room classification for visitors.

use waycost_core::{CellIndex, Cost, CostSettings, WorldView};
use waycost_source::{CellRule, SourceKind};

/// Keeps visitors out of the colony's rooms.
///
/// Cells outside any room, in a huge room or on a doorway cost nothing;
/// outdoors rooms cost the outdoors knob and enclosed rooms the indoor
/// knob. The topology solver reports no per-cell deltas, so every room
/// recomputation must be reported as a whole-grid change.
#[derive(Clone, Debug)]
pub struct EnclosedSpaceRule {
    outdoors: Cost,
    indoor: Cost,
}

impl EnclosedSpaceRule {
    /// Rule reading its knobs from `settings`.
    pub fn new(settings: &CostSettings) -> Self {
        Self {
            outdoors: settings.visitor_outdoors_room_cost,
            indoor: settings.visitor_indoor_room_cost,
        }
    }
}

impl CellRule for EnclosedSpaceRule {
    type Frame = ();

    fn kind(&self) -> SourceKind {
        SourceKind::EnclosedSpace
    }

    fn prepare(&self, _world: &dyn WorldView) {}

    fn cost_at(&self, _: &(), world: &dyn WorldView, cell: CellIndex) -> Cost {
        match world.room_at(cell) {
            None => 0,
            Some(room) if room.is_huge || room.is_doorway => 0,
            Some(room) if room.psychologically_outdoors => self.outdoors,
            Some(_) => self.indoor,
        }
    }

    fn reconfigure(&mut self, settings: &CostSettings) {
        *self = Self::new(settings);
    }
}
