//! The read-only world view cost sources compute against.
//!
//! The world-state owner is an external collaborator. Sources only ever
//! see it through [`WorldView`], whose accessors must be safe to call from
//! worker threads while other sources compute in parallel. Every accessor
//! answers "nothing here" for cells it knows nothing about, which the
//! sources translate to zero cost.

use crate::cells::CellIndex;
use crate::error::CostError;

/// Terrain properties relevant to path costs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainInfo {
    /// Walking over this terrain tracks dirt into clean areas.
    pub generates_filth: bool,
}

/// Player-assigned traffic priority of a door.
///
/// Doors with a raised priority are ones the colony would rather not use
/// for everyday traffic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DoorPriority {
    /// Ordinary door; no extra cost.
    #[default]
    Normal,
    /// Side door; mildly discouraged.
    Side,
    /// Emergency exit; strongly discouraged.
    Emergency,
}

impl DoorPriority {
    /// All priorities in discriminant order.
    pub const ALL: [DoorPriority; 3] = [Self::Normal, Self::Side, Self::Emergency];

    /// The priority a "cycle priority" command moves to.
    pub fn next(self) -> Self {
        match self {
            Self::Normal => Self::Side,
            Self::Side => Self::Emergency,
            Self::Emergency => Self::Normal,
        }
    }
}

impl TryFrom<u8> for DoorPriority {
    type Error = CostError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(CostError::UnknownDoorPriority { value })
    }
}

/// Zone designation of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneKind {
    /// A growing zone (crops); trampling through it is discouraged.
    Growing,
    /// Any other zone kind; carries no cost.
    Other,
}

/// Intensity tier of a player-declared avoidance area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AvoidLevel {
    /// "Path Avoid Low".
    Low,
    /// "Path Avoid Medium".
    Medium,
    /// "Path Avoid High".
    High,
}

impl AvoidLevel {
    /// All tiers, lowest first.
    pub const ALL: [AvoidLevel; 3] = [Self::Low, Self::Medium, Self::High];
}

/// Room classification of a cell, as produced by the topology solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoomInfo {
    /// The room is too large to count as enclosed space.
    pub is_huge: bool,
    /// The cell is a doorway connecting rooms.
    pub is_doorway: bool,
    /// The room counts as outdoors for the occupants' perception.
    pub psychologically_outdoors: bool,
}

/// Snapshot of the grid-wide weather state.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherState {
    /// The current weather imposes a mood penalty on exposed pawns.
    pub current_has_thought: bool,
    /// The previous weather imposed a mood penalty.
    pub last_has_thought: bool,
    /// Progress of the transition from previous to current weather, `0.0..=1.0`.
    pub transition_progress: f32,
    /// Movement speed multiplier imposed by the weather.
    pub move_speed_multiplier: f32,
}

impl WeatherState {
    /// Clear, settled weather.
    pub const CLEAR: WeatherState = WeatherState {
        current_has_thought: false,
        last_has_thought: false,
        transition_progress: 1.0,
        move_speed_multiplier: 1.0,
    };

    /// Whether exposed cells should be avoided.
    ///
    /// Bad when the current weather penalises mood, when the previous one
    /// did and the transition has not finished, or when it slows movement.
    pub fn is_bad(&self) -> bool {
        self.current_has_thought
            || (self.last_has_thought && self.transition_progress < 1.0)
            || self.move_speed_multiplier < 1.0
    }
}

impl Default for WeatherState {
    fn default() -> Self {
        Self::CLEAR
    }
}

/// Thread-safe read access to the world state of one grid instance.
///
/// All methods except [`cell_count`](WorldView::cell_count) have "empty
/// world" defaults so test doubles and partial integrations implement only
/// what they model. Implementations iterating dynamic membership
/// collections must do so over a stable snapshot.
pub trait WorldView: Sync {
    /// Number of cells in the grid instance.
    fn cell_count(&self) -> usize;

    /// Terrain at `cell`, or `None` when undefined.
    fn terrain_at(&self, _cell: CellIndex) -> Option<TerrainInfo> {
        None
    }

    /// Priority of the door covering `cell`, if any.
    fn door_at(&self, _cell: CellIndex) -> Option<DoorPriority> {
        None
    }

    /// Zone containing `cell`, if any.
    fn zone_at(&self, _cell: CellIndex) -> Option<ZoneKind> {
        None
    }

    /// Whether the avoidance area of tier `level` exists and contains `cell`.
    fn in_avoid_area(&self, _level: AvoidLevel, _cell: CellIndex) -> bool {
        false
    }

    /// Room classification of `cell`, or `None` outside any room.
    fn room_at(&self, _cell: CellIndex) -> Option<RoomInfo> {
        None
    }

    /// Current grid-wide weather.
    fn weather(&self) -> WeatherState {
        WeatherState::CLEAR
    }

    /// Whether `cell` is under a roof.
    fn is_roofed(&self, _cell: CellIndex) -> bool {
        false
    }
}
