//! The [`CostSettings`] knob table.
//!
//! Each knob is a non-negative cost persisted under a stable PascalCase
//! key. A knob of zero switches its contribution off, and a source whose
//! knobs are all zero is never instantiated.

use crate::category::TraversalCategory;
use crate::cost::{Cost, MAX_COST};
use crate::error::CostError;
use crate::world::{AvoidLevel, DoorPriority};

/// Names one entry of the knob table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Knob {
    /// Cost of terrain that generates filth.
    Dirty,
    /// Cost of a side-priority door.
    SideDoor,
    /// Cost of an emergency-priority door.
    EmergencyDoor,
    /// Visitor cost for cells in an outdoors room.
    VisitorOutdoorsRoom,
    /// Visitor cost for cells in an enclosed indoor room.
    VisitorIndoorRoom,
    /// Colony cost for cells in a growing zone.
    GrowingZoneColony,
    /// Visitor cost for cells in a growing zone.
    GrowingZoneFriendly,
    /// Cost of the low-tier avoidance area.
    AreaAvoidLow,
    /// Cost of the medium-tier avoidance area.
    AreaAvoidMedium,
    /// Cost of the high-tier avoidance area.
    AreaAvoidHigh,
    /// Cost of unroofed cells in bad weather.
    Weather,
}

impl Knob {
    /// Every knob, in persisted order.
    pub const ALL: [Knob; 11] = [
        Self::Dirty,
        Self::SideDoor,
        Self::EmergencyDoor,
        Self::VisitorOutdoorsRoom,
        Self::VisitorIndoorRoom,
        Self::GrowingZoneColony,
        Self::GrowingZoneFriendly,
        Self::AreaAvoidLow,
        Self::AreaAvoidMedium,
        Self::AreaAvoidHigh,
        Self::Weather,
    ];

    /// Persisted key.
    pub fn key(self) -> &'static str {
        match self {
            Self::Dirty => "DirtyCost",
            Self::SideDoor => "SideDoorCost",
            Self::EmergencyDoor => "EmergencyDoorCost",
            Self::VisitorOutdoorsRoom => "VisitingCaravanOutdoorsRoomCost",
            Self::VisitorIndoorRoom => "VisitingCaravanIndoorRoomCost",
            Self::GrowingZoneColony => "GrowingZoneCostColony",
            Self::GrowingZoneFriendly => "GrowingZoneCostFriendly",
            Self::AreaAvoidLow => "AreaAvoidLowCost",
            Self::AreaAvoidMedium => "AreaAvoidMediumCost",
            Self::AreaAvoidHigh => "AreaAvoidHighCost",
            Self::Weather => "WeatherCost",
        }
    }

    /// Look a knob up by its persisted key.
    pub fn from_key(key: &str) -> Option<Knob> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }
}

/// Per-knob extra path costs.
///
/// # Examples
///
/// ```
/// use waycost_core::{CostSettings, TraversalCategory};
///
/// let mut settings = CostSettings::default();
/// assert_eq!(settings.get("SideDoorCost").unwrap(), 200);
///
/// settings.set("SideDoorCost", 0).unwrap();
/// assert!(settings.is_category_enabled(TraversalCategory::Colony));
/// assert!(!settings.is_category_enabled(TraversalCategory::None));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CostSettings {
    /// Filth-generating terrain.
    #[cfg_attr(feature = "serde", serde(rename = "DirtyCost"))]
    pub dirty_cost: Cost,
    /// Side-priority door.
    #[cfg_attr(feature = "serde", serde(rename = "SideDoorCost"))]
    pub side_door_cost: Cost,
    /// Emergency-priority door.
    #[cfg_attr(feature = "serde", serde(rename = "EmergencyDoorCost"))]
    pub emergency_door_cost: Cost,
    /// Visitors, cell in an outdoors room.
    #[cfg_attr(feature = "serde", serde(rename = "VisitingCaravanOutdoorsRoomCost"))]
    pub visitor_outdoors_room_cost: Cost,
    /// Visitors, cell in an indoor room.
    #[cfg_attr(feature = "serde", serde(rename = "VisitingCaravanIndoorRoomCost"))]
    pub visitor_indoor_room_cost: Cost,
    /// Colony, cell in a growing zone.
    #[cfg_attr(feature = "serde", serde(rename = "GrowingZoneCostColony"))]
    pub growing_zone_cost_colony: Cost,
    /// Visitors, cell in a growing zone.
    #[cfg_attr(feature = "serde", serde(rename = "GrowingZoneCostFriendly"))]
    pub growing_zone_cost_friendly: Cost,
    /// Low-tier avoidance area.
    #[cfg_attr(feature = "serde", serde(rename = "AreaAvoidLowCost"))]
    pub area_avoid_low_cost: Cost,
    /// Medium-tier avoidance area.
    #[cfg_attr(feature = "serde", serde(rename = "AreaAvoidMediumCost"))]
    pub area_avoid_medium_cost: Cost,
    /// High-tier avoidance area.
    #[cfg_attr(feature = "serde", serde(rename = "AreaAvoidHighCost"))]
    pub area_avoid_high_cost: Cost,
    /// Unroofed cell in bad weather.
    #[cfg_attr(feature = "serde", serde(rename = "WeatherCost"))]
    pub weather_cost: Cost,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            dirty_cost: 10,
            side_door_cost: 200,
            emergency_door_cost: 500,
            visitor_outdoors_room_cost: 10,
            visitor_indoor_room_cost: 100,
            growing_zone_cost_colony: 10,
            growing_zone_cost_friendly: 10,
            area_avoid_low_cost: 20,
            area_avoid_medium_cost: 100,
            area_avoid_high_cost: 500,
            weather_cost: 20,
        }
    }
}

impl CostSettings {
    /// Settings with every knob at zero: nothing is ever instantiated.
    pub fn disabled() -> Self {
        Self::from_fn(|_| 0)
    }

    /// Build settings by evaluating `f` for every knob.
    pub fn from_fn(mut f: impl FnMut(Knob) -> Cost) -> Self {
        let mut settings = Self::default();
        for knob in Knob::ALL {
            *settings.slot_mut(knob) = f(knob);
        }
        settings
    }

    /// Value of a knob.
    pub fn knob(&self, knob: Knob) -> Cost {
        match knob {
            Knob::Dirty => self.dirty_cost,
            Knob::SideDoor => self.side_door_cost,
            Knob::EmergencyDoor => self.emergency_door_cost,
            Knob::VisitorOutdoorsRoom => self.visitor_outdoors_room_cost,
            Knob::VisitorIndoorRoom => self.visitor_indoor_room_cost,
            Knob::GrowingZoneColony => self.growing_zone_cost_colony,
            Knob::GrowingZoneFriendly => self.growing_zone_cost_friendly,
            Knob::AreaAvoidLow => self.area_avoid_low_cost,
            Knob::AreaAvoidMedium => self.area_avoid_medium_cost,
            Knob::AreaAvoidHigh => self.area_avoid_high_cost,
            Knob::Weather => self.weather_cost,
        }
    }

    fn slot_mut(&mut self, knob: Knob) -> &mut Cost {
        match knob {
            Knob::Dirty => &mut self.dirty_cost,
            Knob::SideDoor => &mut self.side_door_cost,
            Knob::EmergencyDoor => &mut self.emergency_door_cost,
            Knob::VisitorOutdoorsRoom => &mut self.visitor_outdoors_room_cost,
            Knob::VisitorIndoorRoom => &mut self.visitor_indoor_room_cost,
            Knob::GrowingZoneColony => &mut self.growing_zone_cost_colony,
            Knob::GrowingZoneFriendly => &mut self.growing_zone_cost_friendly,
            Knob::AreaAvoidLow => &mut self.area_avoid_low_cost,
            Knob::AreaAvoidMedium => &mut self.area_avoid_medium_cost,
            Knob::AreaAvoidHigh => &mut self.area_avoid_high_cost,
            Knob::Weather => &mut self.weather_cost,
        }
    }

    /// Value of the knob persisted under `key`.
    pub fn get(&self, key: &str) -> Result<Cost, CostError> {
        Knob::from_key(key)
            .map(|k| self.knob(k))
            .ok_or_else(|| CostError::UnknownKnob { name: key.into() })
    }

    /// Set the knob persisted under `key`.
    ///
    /// Values outside `0..=65535` are rejected and leave the settings
    /// unchanged.
    pub fn set(&mut self, key: &str, value: i64) -> Result<(), CostError> {
        let knob = Knob::from_key(key).ok_or_else(|| CostError::UnknownKnob { name: key.into() })?;
        if !(0..=MAX_COST as i64).contains(&value) {
            return Err(CostError::InvalidKnobValue {
                name: key.into(),
                value,
            });
        }
        *self.slot_mut(knob) = value as Cost;
        Ok(())
    }

    /// Every knob as a `(key, value)` pair, in persisted order.
    pub fn to_pairs(&self) -> Vec<(&'static str, Cost)> {
        Knob::ALL.iter().map(|&k| (k.key(), self.knob(k))).collect()
    }

    /// Rebuild settings from persisted pairs. Missing keys keep their defaults.
    pub fn from_pairs<K, I>(pairs: I) -> Result<Self, CostError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, i64)>,
    {
        let mut settings = Self::default();
        for (key, value) in pairs {
            settings.set(key.as_ref(), value)?;
        }
        Ok(settings)
    }

    /// Cost of a door with the given priority.
    pub fn door_cost(&self, priority: DoorPriority) -> Cost {
        match priority {
            DoorPriority::Normal => 0,
            DoorPriority::Side => self.side_door_cost,
            DoorPriority::Emergency => self.emergency_door_cost,
        }
    }

    /// Growing-zone cost for a category.
    ///
    /// # Panics
    ///
    /// For [`TraversalCategory::None`], which has no growing-zone knob.
    pub fn growing_zone_cost(&self, category: TraversalCategory) -> Cost {
        match category {
            TraversalCategory::None => {
                panic!("traversal category none has no growing-zone knob")
            }
            TraversalCategory::Colony => self.growing_zone_cost_colony,
            TraversalCategory::Friendly => self.growing_zone_cost_friendly,
        }
    }

    /// Cost of the avoidance area of a tier.
    pub fn area_cost(&self, level: AvoidLevel) -> Cost {
        match level {
            AvoidLevel::Low => self.area_avoid_low_cost,
            AvoidLevel::Medium => self.area_avoid_medium_cost,
            AvoidLevel::High => self.area_avoid_high_cost,
        }
    }

    fn any_shared_knob(&self) -> bool {
        self.dirty_cost != 0
            || self.side_door_cost != 0
            || self.emergency_door_cost != 0
            || self.area_avoid_low_cost != 0
            || self.area_avoid_medium_cost != 0
            || self.area_avoid_high_cost != 0
            || self.weather_cost != 0
    }

    /// Whether any source could contribute for `category`.
    ///
    /// The integration layer skips installing an overlay for categories
    /// where this is `false`.
    pub fn is_category_enabled(&self, category: TraversalCategory) -> bool {
        match category {
            TraversalCategory::None => false,
            TraversalCategory::Colony => {
                self.any_shared_knob() || self.growing_zone_cost_colony != 0
            }
            TraversalCategory::Friendly => {
                self.any_shared_knob()
                    || self.growing_zone_cost_friendly != 0
                    || self.visitor_outdoors_room_cost != 0
                    || self.visitor_indoor_room_cost != 0
            }
        }
    }
}
