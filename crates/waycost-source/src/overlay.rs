//! Externally supplied overlays an aggregator composes with.

use waycost_arena::CostGrid;
use waycost_core::OverlayId;

/// A pre-existing per-cell cost provider owned by another collaborator.
///
/// The aggregator adds the overlay's costs to its own merge. It cannot see
/// per-cell changes inside the overlay; it only re-reads every cell when
/// [`version`](WrappedOverlay::version) moves. An overlay that mutates its
/// grid without bumping the version is merged stale until something else
/// forces a whole-grid merge.
pub trait WrappedOverlay: Send + Sync {
    /// Stable identity, part of the aggregator cache key.
    fn overlay_id(&self) -> OverlayId;

    /// Current costs. Expected to have the grid's cell count.
    fn grid(&self) -> CostGrid;

    /// Opaque content version. Default: constant.
    fn version(&self) -> u64 {
        0
    }
}
