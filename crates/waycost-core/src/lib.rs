//! Core types and traits for waycost pathfinding cost overlays.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental vocabulary shared by the whole workspace: the
//! saturating [`Cost`] arithmetic, [`TraversalCategory`], the
//! [`CellSet`] dirty set, the [`WorldView`] trait through which cost
//! sources read world state, the [`CostSettings`] knob table, and the
//! [`CostError`] type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod category;
pub mod cells;
pub mod cost;
pub mod error;
pub mod id;
pub mod settings;
pub mod world;

pub use category::TraversalCategory;
pub use cells::{CellIndex, CellSet};
pub use cost::{saturating_sum, Cost, MAX_COST};
pub use error::CostError;
pub use id::OverlayId;
pub use settings::{CostSettings, Knob};
pub use world::{
    AvoidLevel, DoorPriority, RoomInfo, TerrainInfo, WeatherState, WorldView, ZoneKind,
};
