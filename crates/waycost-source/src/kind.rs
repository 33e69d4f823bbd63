//! The closed set of contributor kinds.

use std::fmt;

use waycost_core::{AvoidLevel, CostSettings, TraversalCategory};

/// Which contributor a cost source is.
///
/// The set is closed: every contributor the engine can instantiate is a
/// variant here, and the variant decides both which categories the source
/// serves and which knobs switch it on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    /// Filth-generating terrain.
    TerrainHazard,
    /// Doors with a raised traffic priority.
    Obstacle,
    /// Growing zones, one instance per category.
    Zone(TraversalCategory),
    /// Player-declared avoidance areas.
    AvoidArea,
    /// Room classification for visitors.
    EnclosedSpace,
    /// Unroofed cells during bad weather.
    Weather,
}

const SHARED: &[TraversalCategory] = &[TraversalCategory::Colony, TraversalCategory::Friendly];
const FRIENDLY: &[TraversalCategory] = &[TraversalCategory::Friendly];
const COLONY: &[TraversalCategory] = &[TraversalCategory::Colony];
const NONE: &[TraversalCategory] = &[TraversalCategory::None];

impl SourceKind {
    /// Every instantiable kind, in the order a registry builds them.
    pub const CANONICAL: [SourceKind; 7] = [
        Self::TerrainHazard,
        Self::Obstacle,
        Self::Zone(TraversalCategory::Colony),
        Self::Zone(TraversalCategory::Friendly),
        Self::AvoidArea,
        Self::EnclosedSpace,
        Self::Weather,
    ];

    /// Stable name for logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            Self::TerrainHazard => "terrain_hazard",
            Self::Obstacle => "obstacle",
            Self::Zone(TraversalCategory::None) => "zone_none",
            Self::Zone(TraversalCategory::Colony) => "zone_colony",
            Self::Zone(TraversalCategory::Friendly) => "zone_friendly",
            Self::AvoidArea => "avoid_area",
            Self::EnclosedSpace => "enclosed_space",
            Self::Weather => "weather",
        }
    }

    /// Categories whose merged grids include this source.
    pub fn categories(self) -> &'static [TraversalCategory] {
        match self {
            Self::TerrainHazard | Self::Obstacle | Self::AvoidArea | Self::Weather => SHARED,
            Self::EnclosedSpace => FRIENDLY,
            Self::Zone(TraversalCategory::None) => NONE,
            Self::Zone(TraversalCategory::Colony) => COLONY,
            Self::Zone(TraversalCategory::Friendly) => FRIENDLY,
        }
    }

    /// Whether this source contributes to `category`.
    pub fn serves(self, category: TraversalCategory) -> bool {
        self.categories().contains(&category)
    }

    /// Whether any of this kind's knobs is non-zero.
    pub fn is_enabled(self, settings: &CostSettings) -> bool {
        match self {
            Self::TerrainHazard => settings.dirty_cost != 0,
            Self::Obstacle => settings.side_door_cost != 0 || settings.emergency_door_cost != 0,
            Self::Zone(TraversalCategory::None) => false,
            Self::Zone(category) => settings.growing_zone_cost(category) != 0,
            Self::AvoidArea => AvoidLevel::ALL.iter().any(|&l| settings.area_cost(l) != 0),
            Self::EnclosedSpace => {
                settings.visitor_outdoors_room_cost != 0 || settings.visitor_indoor_room_cost != 0
            }
            Self::Weather => settings.weather_cost != 0,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
