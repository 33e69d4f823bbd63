//! Merged cost grids and their cache.
//!
//! An [`Aggregator`] produces the grid the pathfinder reads for one
//! `(category, grid instance, wrapped overlay)` key. Reconciliation is
//! pull-based: on every [`get_grid`](Aggregator::get_grid) the aggregator
//! walks its sources' change journals from the revision it last merged,
//! and re-merges only the cells published since. A whole-grid change, a
//! journal gap or a wrapped-overlay version bump re-merges everything.
//!
//! # Modes
//!
//! - **Shared**: exactly one relevant source and no wrapped overlay. The
//!   aggregator holds a read view of that source's buffer and never merges;
//!   the source stays the owner.
//! - **Owned**: anything else. The aggregator owns its merged buffer.
//!
//! The mode is fixed at construction.

use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, trace, warn};
use waycost_arena::{CostBuffer, CostGrid, GridHandle};
use waycost_core::{saturating_sum, CellIndex, CellSet, Cost, OverlayId, TraversalCategory};
use waycost_source::{Catchup, SourceKind, WrappedOverlay};

use crate::metrics::MergeMetrics;
use crate::registry::GridSources;

/// Cache key of an aggregator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AggregatorKey {
    /// Traversal category whose sources are merged.
    pub category: TraversalCategory,
    /// Grid instance.
    pub grid: GridHandle,
    /// Identity of the wrapped overlay, if any.
    pub wrapped: Option<OverlayId>,
}

struct SourceLink {
    kind: SourceKind,
    grid: CostGrid,
    seen_revision: u64,
}

struct WrappedLink {
    overlay: Arc<dyn WrappedOverlay>,
    seen_version: u64,
}

struct OwnedMerge {
    buffer: CostBuffer,
    links: Vec<SourceLink>,
    wrapped: Option<WrappedLink>,
    dirty: CellSet,
    all_dirty: bool,
}

enum Mode {
    Shared { kind: SourceKind, grid: CostGrid },
    Owned(OwnedMerge),
}

/// Merges the relevant sources of one grid, plus an optional wrapped
/// overlay, into the grid the pathfinder reads.
pub struct Aggregator {
    key: AggregatorKey,
    serial: u64,
    mode: Mode,
    metrics: MergeMetrics,
}

impl Aggregator {
    /// Build an aggregator for `key` over the relevant members of `sources`.
    ///
    /// # Panics
    ///
    /// Panics if `wrapped` does not match `key.wrapped`.
    pub fn new(
        key: AggregatorKey,
        serial: u64,
        sources: &GridSources,
        wrapped: Option<Arc<dyn WrappedOverlay>>,
    ) -> Self {
        assert_eq!(
            key.wrapped,
            wrapped.as_ref().map(|o| o.overlay_id()),
            "aggregator key does not match wrapped overlay"
        );
        let relevant: Vec<_> = sources.sources_for(key.category).collect();
        let mode = match (relevant.as_slice(), wrapped) {
            ([only], None) => Mode::Shared {
                kind: only.kind(),
                grid: only.grid(),
            },
            (_, wrapped) => Mode::Owned(OwnedMerge {
                buffer: CostBuffer::new(sources.cell_count()),
                links: relevant
                    .iter()
                    .map(|s| SourceLink {
                        kind: s.kind(),
                        grid: s.grid(),
                        seen_revision: 0,
                    })
                    .collect(),
                wrapped: wrapped.map(|overlay| WrappedLink {
                    seen_version: overlay.version(),
                    overlay,
                }),
                dirty: CellSet::with_cell_count(sources.cell_count()),
                all_dirty: true,
            }),
        };
        Self {
            key,
            serial,
            mode,
            metrics: MergeMetrics::default(),
        }
    }

    /// This aggregator's cache key.
    pub fn key(&self) -> AggregatorKey {
        self.key
    }

    /// Cache-assigned serial number, unique per cache.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Whether the aggregator republishes a single source's buffer.
    pub fn is_shared(&self) -> bool {
        matches!(self.mode, Mode::Shared { .. })
    }

    /// Whether the aggregator composes with a wrapped overlay.
    pub fn is_wrapping(&self) -> bool {
        self.key.wrapped.is_some()
    }

    /// Merge counters.
    pub fn metrics(&self) -> MergeMetrics {
        self.metrics
    }

    /// Bring the merged grid up to date with `sources` and return it.
    ///
    /// Calling twice with no intervening change returns identical contents
    /// and merges nothing the second time.
    pub fn get_grid(&mut self, sources: &GridSources) -> CostGrid {
        let merge = match &mut self.mode {
            Mode::Shared { kind, grid } => {
                debug_assert!(sources.source(*kind).is_some());
                self.metrics.shared_reads += 1;
                return grid.clone();
            }
            Mode::Owned(merge) => merge,
        };

        for link in &mut merge.links {
            let Some(source) = sources.source(link.kind) else {
                warn!("{}: source {} vanished, merging all cells", self.key.grid, link.kind);
                merge.all_dirty = true;
                continue;
            };
            let state = source.state();
            if state.collect_since(link.seen_revision, &mut merge.dirty) == Catchup::Full {
                merge.all_dirty = true;
            }
            link.seen_revision = state.revision();
        }

        let wrapped_grid = match &mut merge.wrapped {
            Some(link) => {
                let version = link.overlay.version();
                if version != link.seen_version {
                    link.seen_version = version;
                    merge.all_dirty = true;
                }
                Some(link.overlay.grid())
            }
            None => None,
        };

        let n = merge.buffer.len();
        if merge.all_dirty {
            if let Some(grid) = &wrapped_grid {
                if grid.len() != n {
                    warn!(
                        "{}: wrapped overlay has {} cells, grid has {n}; missing cells count as 0",
                        self.key.grid,
                        grid.len()
                    );
                }
            }
            for cell in 0..n {
                let cost = merged_cost(&merge.links, wrapped_grid.as_ref(), cell);
                merge.buffer.set(cell, cost);
            }
            merge.all_dirty = false;
            merge.dirty.clear();
            self.metrics.full_merges += 1;
            self.metrics.cells_merged += n as u64;
            trace!("{}/{}: full merge of {n} cells", self.key.grid, self.key.category);
        } else if !merge.dirty.is_empty() {
            let cells = merge.dirty.take();
            for &cell in &cells {
                let cost = merged_cost(&merge.links, wrapped_grid.as_ref(), cell);
                merge.buffer.set(cell, cost);
            }
            self.metrics.partial_merges += 1;
            self.metrics.cells_merged += cells.len() as u64;
            trace!(
                "{}/{}: merged {} dirty cells",
                self.key.grid,
                self.key.category,
                cells.len()
            );
        } else {
            self.metrics.clean_reads += 1;
        }
        merge.buffer.share()
    }
}

fn merged_cost(links: &[SourceLink], wrapped: Option<&CostGrid>, cell: CellIndex) -> Cost {
    let sources = links.iter().map(|l| l.grid.at(cell));
    let overlay = wrapped.and_then(|g| g.get(cell));
    saturating_sum(sources.chain(overlay))
}

/// Aggregators keyed by [`AggregatorKey`].
#[derive(Default)]
pub struct AggregatorCache {
    entries: IndexMap<AggregatorKey, Aggregator>,
    next_serial: u64,
}

impl AggregatorCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The aggregator for `(category, sources' grid, wrapped)`, created on
    /// first request.
    pub fn get_or_create(
        &mut self,
        category: TraversalCategory,
        grid: GridHandle,
        sources: &GridSources,
        wrapped: Option<&Arc<dyn WrappedOverlay>>,
    ) -> &mut Aggregator {
        let key = AggregatorKey {
            category,
            grid,
            wrapped: wrapped.map(|o| o.overlay_id()),
        };
        let next_serial = &mut self.next_serial;
        self.entries.entry(key).or_insert_with(|| {
            *next_serial += 1;
            let aggregator = Aggregator::new(key, *next_serial, sources, wrapped.cloned());
            debug!(
                "{grid}/{category}: created {} aggregator over {} sources{}",
                if aggregator.is_shared() { "shared" } else { "owned" },
                sources.count_for(category),
                match key.wrapped {
                    Some(id) => format!(" wrapping {id}"),
                    None => String::new(),
                }
            );
            aggregator
        })
    }

    /// The aggregator for `key`, if cached.
    pub fn get(&self, key: &AggregatorKey) -> Option<&Aggregator> {
        self.entries.get(key)
    }

    /// Drop every aggregator of `grid`. Returns how many were dropped.
    pub fn evict_grid(&mut self, grid: GridHandle) -> usize {
        self.evict(|key| key.grid == grid, grid, "all")
    }

    /// Drop the aggregators of `grid` that wrap an overlay.
    pub fn evict_wrapping(&mut self, grid: GridHandle) -> usize {
        self.evict(|key| key.grid == grid && key.wrapped.is_some(), grid, "wrapping")
    }

    fn evict(&mut self, matches: impl Fn(&AggregatorKey) -> bool, grid: GridHandle, what: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !matches(key));
        let evicted = before - self.entries.len();
        if evicted > 0 {
            debug!("{grid}: evicted {evicted} {what} aggregators");
        }
        evicted
    }

    /// Number of cached aggregators.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every cached aggregator.
    pub fn iter(&self) -> impl Iterator<Item = &Aggregator> + '_ {
        self.entries.values()
    }
}
