//! Overlay engine for waycost.
//!
//! Ties the pieces together for the pathfinder:
//!
//! - [`CostSourceRegistry`]: per grid instance, the active cost sources
//!   partitioned by traversal category.
//! - [`Aggregator`] / [`AggregatorCache`]: merged grids keyed by
//!   `(category, grid, wrapped overlay)`, reconciled lazily from the
//!   sources' change journals.
//! - [`MutationKind`]: which sources a world mutation touches.
//! - [`Notifier`]: a cloneable, non-blocking mutation inbox for producers on
//!   other threads.
//! - [`CostOverlays`]: the facade owning all of the above plus the
//!   grid-instance arena.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregator;
pub mod config;
pub mod error;
pub mod inbox;
pub mod metrics;
pub mod overlays;
pub mod registry;
pub mod routing;

pub use aggregator::{Aggregator, AggregatorCache, AggregatorKey};
pub use config::{ConfigError, EngineConfig};
pub use error::OverlayError;
pub use inbox::{ChangeScope, DrainReport, Notification, Notifier};
pub use metrics::MergeMetrics;
pub use overlays::CostOverlays;
pub use registry::{CostSourceRegistry, GridSources};
pub use routing::MutationKind;
