//! Waycost: incremental extra path-cost overlays for grid pathfinding.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! waycost sub-crates. Cost contributors (terrain hazards, door priorities,
//! growing zones, avoidance areas, rooms, weather) each keep a per-cell cost
//! buffer; aggregators merge the ones relevant to a traversal category with
//! saturating addition, and only re-merge what changed.
//!
//! # Quick start
//!
//! ```rust
//! use waycost::prelude::*;
//!
//! // The host's world. Every datum defaults to "absent", so only the
//! // pieces this host knows about need overriding.
//! struct Muddy {
//!     filthy: Vec<bool>,
//! }
//!
//! impl WorldView for Muddy {
//!     fn cell_count(&self) -> usize {
//!         self.filthy.len()
//!     }
//!     fn terrain_at(&self, cell: usize) -> Option<TerrainInfo> {
//!         Some(TerrainInfo { generates_filth: self.filthy[cell] })
//!     }
//! }
//!
//! let layout = GridLayout::new(4, 4).unwrap();
//! let mut world = Muddy { filthy: vec![false; 16] };
//! let mut overlays = CostOverlays::new(EngineConfig::default()).unwrap();
//! let grid = overlays.create_grid(layout);
//! overlays.compute_all(grid, &world).unwrap();
//!
//! // Something made cell (1, 2) muddy.
//! let cell = layout.index_of(CellCoord { x: 1, z: 2 }).unwrap();
//! world.filthy[cell] = true;
//! overlays.cell_changed(grid, MutationKind::TerrainChanged, cell).unwrap();
//! overlays.update_incrementally(grid, &world, &[]).unwrap();
//!
//! let costs = overlays
//!     .get_merged_grid(TraversalCategory::Colony, grid, None)
//!     .unwrap();
//! assert_eq!(costs.at(cell), overlays.settings().dirty_cost);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `waycost-core` | `Cost`, categories, `CellSet`, settings, world view |
//! | [`space`] | `waycost-space` | Grid layout and cell coordinates |
//! | [`arena`] | `waycost-arena` | Cost buffers, shared views, grid handles |
//! | [`source`] | `waycost-source` | `CostSource` trait, change journal, rule sources |
//! | [`sources`] | `waycost-sources` | The built-in contributors |
//! | [`engine`] | `waycost-engine` | Registry, aggregators, routing, the facade |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, knobs and the world view (`waycost-core`).
pub use waycost_core as types;

/// Grid layout (`waycost-space`).
pub use waycost_space as space;

/// Cost buffers and the grid-instance arena (`waycost-arena`).
///
/// [`arena::CostGrid`] is what the pathfinder reads.
pub use waycost_arena as arena;

/// Cost source trait and bookkeeping (`waycost-source`).
///
/// Implement [`source::CellRule`] and wrap it in [`source::RuleSource`] to
/// add a contributor of your own.
pub use waycost_source as source;

/// Built-in contributors (`waycost-sources`).
pub use waycost_sources as sources;

/// Registry, aggregator cache and the [`engine::CostOverlays`] facade
/// (`waycost-engine`).
pub use waycost_engine as engine;

/// Common imports for typical waycost usage.
///
/// ```rust
/// use waycost::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use waycost_core::{
        CellIndex, Cost, CostSettings, Knob, TraversalCategory, WorldView, MAX_COST,
    };

    // World value types
    pub use waycost_core::{
        AvoidLevel, DoorPriority, RoomInfo, TerrainInfo, WeatherState, ZoneKind,
    };

    // Space
    pub use waycost_space::{CellCoord, GridLayout};

    // Arena
    pub use waycost_arena::{CostGrid, GridHandle};

    // Sources
    pub use waycost_source::{CellRule, CostSource, RuleSource, SourceKind, WrappedOverlay};

    // Engine
    pub use waycost_engine::{
        CostOverlays, EngineConfig, MergeMetrics, MutationKind, Notifier, OverlayError,
    };
}
