//! Per-grid-instance ownership of cost sources.

use indexmap::IndexMap;
use log::debug;
use smallvec::SmallVec;
use waycost_arena::GridHandle;
use waycost_core::{CostSettings, TraversalCategory};
use waycost_source::{CostSource, SourceKind};

/// The active cost sources of one grid instance.
///
/// Sources are kept in build order and indexed per traversal category; a
/// source serving several categories appears in each of their lists. At
/// most one source of each [`SourceKind`] exists per grid.
pub struct GridSources {
    cell_count: usize,
    sources: Vec<Box<dyn CostSource>>,
    by_category: [SmallVec<[usize; 8]>; TraversalCategory::COUNT],
}

impl GridSources {
    /// Take ownership of `sources` for a grid of `cell_count` cells.
    ///
    /// # Panics
    ///
    /// Panics if two sources share a kind or a source's buffer does not
    /// have `cell_count` cells.
    pub fn new(cell_count: usize, sources: Vec<Box<dyn CostSource>>) -> Self {
        let mut by_category: [SmallVec<[usize; 8]>; TraversalCategory::COUNT] = Default::default();
        for (i, source) in sources.iter().enumerate() {
            let kind = source.kind();
            assert!(
                sources[..i].iter().all(|s| s.kind() != kind),
                "duplicate cost source kind {kind}"
            );
            assert_eq!(
                source.state().cell_count(),
                cell_count,
                "cost source {kind} sized for the wrong grid"
            );
            for category in kind.categories() {
                by_category[category.index()].push(i);
            }
        }
        Self {
            cell_count,
            sources,
            by_category,
        }
    }

    /// Number of cells every source covers.
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether the grid has no sources at all.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Kinds present, in build order.
    pub fn kinds(&self) -> Vec<SourceKind> {
        self.sources.iter().map(|s| s.kind()).collect()
    }

    /// Every source, in build order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn CostSource> + '_ {
        self.sources.iter().map(|s| s.as_ref())
    }

    /// Every source, mutably.
    pub fn sources_mut(&mut self) -> &mut [Box<dyn CostSource>] {
        &mut self.sources
    }

    /// Sources relevant to `category`, in build order.
    pub fn sources_for(
        &self,
        category: TraversalCategory,
    ) -> impl Iterator<Item = &dyn CostSource> + '_ {
        self.by_category[category.index()]
            .iter()
            .map(|&i| self.sources[i].as_ref())
    }

    /// Number of sources relevant to `category`.
    pub fn count_for(&self, category: TraversalCategory) -> usize {
        self.by_category[category.index()].len()
    }

    /// The source of `kind`, if present.
    pub fn source(&self, kind: SourceKind) -> Option<&dyn CostSource> {
        self.sources
            .iter()
            .find(|s| s.kind() == kind)
            .map(|s| s.as_ref())
    }
}

/// Grid-instance keyed table of [`GridSources`].
pub struct CostSourceRegistry {
    grids: IndexMap<GridHandle, GridSources>,
    journal_capacity: usize,
}

impl CostSourceRegistry {
    /// Empty registry whose sources retain `journal_capacity` change batches.
    pub fn new(journal_capacity: usize) -> Self {
        Self {
            grids: IndexMap::new(),
            journal_capacity,
        }
    }

    /// Sources of `handle`, building them from `settings` on first call.
    ///
    /// Idempotent: later calls return the existing set regardless of
    /// `settings`.
    pub fn get_or_create(
        &mut self,
        handle: GridHandle,
        cell_count: usize,
        settings: &CostSettings,
    ) -> &mut GridSources {
        let journal_capacity = self.journal_capacity;
        self.grids.entry(handle).or_insert_with(|| {
            let sources = waycost_sources::build_sources(settings, cell_count, journal_capacity);
            debug!("{handle}: registered {} cost sources", sources.len());
            GridSources::new(cell_count, sources)
        })
    }

    /// Install an explicit source set, replacing any existing one.
    pub fn insert(&mut self, handle: GridHandle, sources: GridSources) -> Option<GridSources> {
        debug!("{handle}: installed {} custom cost sources", sources.len());
        self.grids.insert(handle, sources)
    }

    /// Sources of `handle`, if registered.
    pub fn get(&self, handle: GridHandle) -> Option<&GridSources> {
        self.grids.get(&handle)
    }

    /// Sources of `handle`, mutably.
    pub fn get_mut(&mut self, handle: GridHandle) -> Option<&mut GridSources> {
        self.grids.get_mut(&handle)
    }

    /// Unregister `handle`, handing its sources back to the caller.
    pub fn remove(&mut self, handle: GridHandle) -> Option<GridSources> {
        let removed = self.grids.shift_remove(&handle);
        if removed.is_some() {
            debug!("{handle}: unregistered cost sources");
        }
        removed
    }

    /// Whether `handle` is registered.
    pub fn contains(&self, handle: GridHandle) -> bool {
        self.grids.contains_key(&handle)
    }

    /// Number of registered grids.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// Whether no grid is registered.
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Registered handles, in registration order.
    pub fn handles(&self) -> Vec<GridHandle> {
        self.grids.keys().copied().collect()
    }

    /// Every registered grid's sources, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (GridHandle, &mut GridSources)> + '_ {
        self.grids.iter_mut().map(|(h, s)| (*h, s))
    }
}
