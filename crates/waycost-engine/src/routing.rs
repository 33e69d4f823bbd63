//! Which cost sources a world mutation touches.

use waycost_source::SourceKind;

/// Kind of world mutation reported by an external producer.
///
/// Each kind maps to a fixed set of affected sources, and some kinds carry
/// no usable per-cell delta and always dirty the whole grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MutationKind {
    /// Terrain at a cell was replaced.
    TerrainChanged,
    /// A structure was placed or removed, or a door's priority changed.
    StructureChanged,
    /// Zone membership of a cell changed.
    ZoneChanged,
    /// A cell was painted into or erased from an avoidance area.
    AvoidAreaCellChanged,
    /// An avoidance area was created, deleted, renamed, inverted or cleared.
    AvoidAreaChanged,
    /// A roof was built or removed over a cell.
    RoofChanged,
    /// The weather changed.
    WeatherChanged,
    /// Rooms were recomputed.
    TopologyChanged,
}

impl MutationKind {
    /// Whether sources of `kind` must react to this mutation.
    pub fn affects(self, kind: SourceKind) -> bool {
        match self {
            Self::TerrainChanged => kind == SourceKind::TerrainHazard,
            Self::StructureChanged => kind == SourceKind::Obstacle,
            Self::ZoneChanged => matches!(kind, SourceKind::Zone(_)),
            Self::AvoidAreaCellChanged | Self::AvoidAreaChanged => kind == SourceKind::AvoidArea,
            Self::RoofChanged | Self::WeatherChanged => kind == SourceKind::Weather,
            Self::TopologyChanged => kind == SourceKind::EnclosedSpace,
        }
    }

    /// Whether the mutation invalidates every cell regardless of the
    /// reported scope.
    pub fn forces_whole_grid(self) -> bool {
        matches!(
            self,
            Self::AvoidAreaChanged | Self::WeatherChanged | Self::TopologyChanged
        )
    }
}
