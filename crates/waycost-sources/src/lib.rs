//! Concrete cost contributors for waycost.
//!
//! Each contributor is a [`CellRule`](waycost_source::CellRule) driven by
//! [`RuleSource`](waycost_source::RuleSource):
//!
//! | Rule | Categories | Knobs |
//! |------|-----------|-------|
//! | [`TerrainHazardRule`] | colony, friendly | `DirtyCost` |
//! | [`ObstacleRule`] | colony, friendly | `SideDoorCost`, `EmergencyDoorCost` |
//! | [`ZoneRule`] | its own category | `GrowingZoneCost*` |
//! | [`AvoidAreaRule`] | colony, friendly | `AreaAvoid*Cost` |
//! | [`EnclosedSpaceRule`] | friendly | `VisitingCaravan*RoomCost` |
//! | [`WeatherRule`] | colony, friendly | `WeatherCost` |
//!
//! [`catalog`] decides which of them a grid instance gets.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod avoid_area;
pub mod catalog;
pub mod enclosed_space;
pub mod obstacle;
pub mod terrain_hazard;
pub mod weather;
pub mod zone;

pub use avoid_area::AvoidAreaRule;
pub use catalog::{build_sources, enabled_kinds, instantiate};
pub use enclosed_space::EnclosedSpaceRule;
pub use obstacle::ObstacleRule;
pub use terrain_hazard::TerrainHazardRule;
pub use weather::WeatherRule;
pub use zone::ZoneRule;
