//! Process-unique identity for externally supplied overlays.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`OverlayId`] allocation.
static OVERLAY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of a wrapped external overlay.
///
/// Allocated from a monotonic atomic counter via [`OverlayId::next`].
/// Aggregator cache keys use it instead of pointer identity so that an
/// overlay dropped and reallocated at the same address can never alias
/// a cached merge built for its predecessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl OverlayId {
    /// Allocate a fresh, unique overlay ID. Thread-safe.
    pub fn next() -> Self {
        Self(OVERLAY_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, for logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay#{}", self.0)
    }
}
