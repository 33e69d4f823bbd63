//! The [`CostOverlays`] facade.

use std::sync::Arc;

use log::{debug, warn};
use waycost_arena::{CostGrid, GridHandle, HandleTable};
use waycost_core::{CellIndex, CostSettings, OverlayId, TraversalCategory, WorldView};
use waycost_source::{CostSource, WrappedOverlay};
use waycost_space::GridLayout;

use crate::aggregator::{AggregatorCache, AggregatorKey};
use crate::config::EngineConfig;
use crate::error::OverlayError;
use crate::inbox::{ChangeScope, DrainReport, Inbox, Notifier};
use crate::metrics::MergeMetrics;
use crate::registry::{CostSourceRegistry, GridSources};
use crate::routing::MutationKind;

struct GridEntry {
    layout: GridLayout,
    custom_sources: bool,
}

/// Cost overlays for every grid instance of one host.
///
/// Owns the grid-instance arena, the source registry, the aggregator cache
/// and the notification inbox. All methods run on the caller's thread;
/// only [`compute_all_parallel`](Self::compute_all_parallel) fans out.
///
/// # Examples
///
/// ```
/// use waycost_core::TraversalCategory;
/// use waycost_engine::{CostOverlays, EngineConfig, MutationKind};
/// use waycost_space::GridLayout;
/// # struct Flat(usize);
/// # impl waycost_core::WorldView for Flat {
/// #     fn cell_count(&self) -> usize { self.0 }
/// # }
///
/// let mut overlays = CostOverlays::new(EngineConfig::default()).unwrap();
/// let grid = overlays.create_grid(GridLayout::new(8, 8).unwrap());
/// let world = Flat(64);
///
/// overlays.compute_all(grid, &world).unwrap();
/// let merged = overlays
///     .get_merged_grid(TraversalCategory::Colony, grid, None)
///     .unwrap();
/// assert_eq!(merged.len(), 64);
///
/// overlays
///     .cell_changed(grid, MutationKind::TerrainChanged, 9)
///     .unwrap();
/// overlays.grid_instance_destroyed(grid).unwrap();
/// assert!(overlays.get_merged_grid(TraversalCategory::Colony, grid, None).is_err());
/// ```
pub struct CostOverlays {
    config: EngineConfig,
    grids: HandleTable<GridEntry>,
    registry: CostSourceRegistry,
    aggregators: AggregatorCache,
    inbox: Inbox,
}

impl CostOverlays {
    /// Create an engine with no grid instances.
    pub fn new(config: EngineConfig) -> Result<Self, OverlayError> {
        config.validate()?;
        Ok(Self {
            registry: CostSourceRegistry::new(config.journal_capacity),
            inbox: Inbox::new(config.notification_capacity),
            grids: HandleTable::new(),
            aggregators: AggregatorCache::new(),
            config,
        })
    }

    // ── Grid lifecycle ─────────────────────────────────────────────

    /// Register a grid instance and build its sources from the current
    /// settings. Sources compute on their first update.
    pub fn create_grid(&mut self, layout: GridLayout) -> GridHandle {
        let handle = self.grids.insert(GridEntry {
            layout,
            custom_sources: false,
        });
        self.registry
            .get_or_create(handle, layout.cell_count(), &self.config.settings);
        debug!(
            "{handle}: created {}x{} grid",
            layout.width(),
            layout.height()
        );
        handle
    }

    /// Register a grid instance with an explicit source set.
    ///
    /// Settings changes reconfigure these sources in place but never
    /// rebuild them.
    ///
    /// # Panics
    ///
    /// Panics if two sources share a kind or a source is sized for a
    /// different cell count.
    pub fn create_grid_with_sources(
        &mut self,
        layout: GridLayout,
        sources: Vec<Box<dyn CostSource>>,
    ) -> GridHandle {
        let sources = GridSources::new(layout.cell_count(), sources);
        let handle = self.grids.insert(GridEntry {
            layout,
            custom_sources: true,
        });
        self.registry.insert(handle, sources);
        handle
    }

    /// Layout of a live grid.
    pub fn layout(&self, grid: GridHandle) -> Result<GridLayout, OverlayError> {
        Ok(self.grids.try_get(grid)?.layout)
    }

    /// Number of live grid instances.
    pub fn grid_count(&self) -> usize {
        self.grids.len()
    }

    /// Tear down a grid instance: its aggregators first, then its sources.
    ///
    /// Views previously handed out stay readable but report
    /// [`is_retired`](CostGrid::is_retired).
    pub fn grid_instance_destroyed(&mut self, grid: GridHandle) -> Result<(), OverlayError> {
        self.grids.try_get(grid)?;
        let evicted = self.aggregators.evict_grid(grid);
        drop(self.registry.remove(grid));
        self.grids.remove(grid);
        debug!("{grid}: destroyed ({evicted} aggregators released)");
        Ok(())
    }

    /// Discard the aggregators of `grid` that wrap an external overlay.
    ///
    /// Non-wrapping aggregators stay: their sources are still valid and
    /// ordinary reconciliation keeps them correct. Returns how many were
    /// evicted.
    pub fn grid_reset(&mut self, grid: GridHandle) -> Result<usize, OverlayError> {
        self.grids.try_get(grid)?;
        Ok(self.aggregators.evict_wrapping(grid))
    }

    // ── Pathfinder queries ─────────────────────────────────────────

    /// The merged cost grid for `category` on `grid`, composed with
    /// `wrapped` if given.
    ///
    /// Category [`None`](TraversalCategory::None) has no sources, so its
    /// merge is all zeros (plus the wrapped overlay).
    pub fn get_merged_grid(
        &mut self,
        category: TraversalCategory,
        grid: GridHandle,
        wrapped: Option<&Arc<dyn WrappedOverlay>>,
    ) -> Result<CostGrid, OverlayError> {
        self.grids.try_get(grid)?;
        let sources = self
            .registry
            .get(grid)
            .ok_or(OverlayError::UnknownGrid { handle: grid })?;
        let aggregator = self
            .aggregators
            .get_or_create(category, grid, sources, wrapped);
        Ok(aggregator.get_grid(sources))
    }

    /// Merge counters of a cached aggregator.
    pub fn merge_metrics(
        &self,
        category: TraversalCategory,
        grid: GridHandle,
        wrapped: Option<OverlayId>,
    ) -> Option<MergeMetrics> {
        let key = AggregatorKey {
            category,
            grid,
            wrapped,
        };
        self.aggregators.get(&key).map(|a| a.metrics())
    }

    /// Number of cached aggregators across all grids.
    pub fn aggregator_count(&self) -> usize {
        self.aggregators.len()
    }

    // ── Source recompute ───────────────────────────────────────────

    fn sources_checked(
        &mut self,
        grid: GridHandle,
        world: &dyn WorldView,
    ) -> Result<&mut GridSources, OverlayError> {
        let expected = self.grids.try_get(grid)?.layout.cell_count();
        if world.cell_count() != expected {
            return Err(OverlayError::WorldSizeMismatch {
                expected,
                actual: world.cell_count(),
            });
        }
        self.registry
            .get_mut(grid)
            .ok_or(OverlayError::UnknownGrid { handle: grid })
    }

    /// Fully recompute every source of `grid`, one after another.
    pub fn compute_all(
        &mut self,
        grid: GridHandle,
        world: &dyn WorldView,
    ) -> Result<(), OverlayError> {
        for source in self.sources_checked(grid, world)?.sources_mut() {
            source.compute_all(world);
        }
        Ok(())
    }

    /// Fully recompute every source of `grid`, one scoped thread per source.
    pub fn compute_all_parallel(
        &mut self,
        grid: GridHandle,
        world: &dyn WorldView,
    ) -> Result<(), OverlayError> {
        let sources = self.sources_checked(grid, world)?.sources_mut();
        std::thread::scope(|s| {
            for source in sources.iter_mut() {
                s.spawn(move || source.compute_all(world));
            }
        });
        Ok(())
    }

    /// Run every source's incremental update with the pathfinder's reported
    /// `changed` cells.
    ///
    /// Returns whether any source changed more than `changed` implies.
    pub fn update_incrementally(
        &mut self,
        grid: GridHandle,
        world: &dyn WorldView,
        changed: &[CellIndex],
    ) -> Result<bool, OverlayError> {
        let mut more = false;
        for source in self.sources_checked(grid, world)?.sources_mut() {
            more |= source.update_incrementally(world, changed);
        }
        Ok(more)
    }

    /// Let every source of `grid` inspect unnotified world state.
    pub fn poll(&mut self, grid: GridHandle, world: &dyn WorldView) -> Result<(), OverlayError> {
        for source in self.sources_checked(grid, world)?.sources_mut() {
            source.poll(world);
        }
        Ok(())
    }

    // ── Mutation notifications ─────────────────────────────────────

    fn route(
        &mut self,
        grid: GridHandle,
        mutation: MutationKind,
        scope: &ChangeScope,
    ) -> Result<(), OverlayError> {
        self.grids.try_get(grid)?;
        let sources = self
            .registry
            .get_mut(grid)
            .ok_or(OverlayError::UnknownGrid { handle: grid })?;
        let whole = mutation.forces_whole_grid() || *scope == ChangeScope::All;
        for source in sources.sources_mut() {
            if !mutation.affects(source.kind()) {
                continue;
            }
            if whole {
                source.mark_all();
                continue;
            }
            match scope {
                ChangeScope::Cell(cell) => source.mark_cell(*cell),
                ChangeScope::Cells(cells) => source.state_mut().mark_cells(cells.iter().copied()),
                ChangeScope::All => source.mark_all(),
            }
        }
        Ok(())
    }

    /// A single cell of `grid` changed.
    pub fn cell_changed(
        &mut self,
        grid: GridHandle,
        mutation: MutationKind,
        cell: CellIndex,
    ) -> Result<(), OverlayError> {
        self.route(grid, mutation, &ChangeScope::Cell(cell))
    }

    /// A set of cells of `grid` changed.
    pub fn cells_changed(
        &mut self,
        grid: GridHandle,
        mutation: MutationKind,
        cells: &[CellIndex],
    ) -> Result<(), OverlayError> {
        self.route(grid, mutation, &ChangeScope::Cells(cells.to_vec()))
    }

    /// Any cell of `grid` may have changed.
    pub fn all_changed(
        &mut self,
        grid: GridHandle,
        mutation: MutationKind,
    ) -> Result<(), OverlayError> {
        self.route(grid, mutation, &ChangeScope::All)
    }

    /// A sender other threads can post mutations through.
    pub fn notifier(&self) -> Notifier {
        self.inbox.notifier()
    }

    /// Route everything posted through [`notifier`](Self::notifier).
    ///
    /// Notifications for destroyed grids are logged and dropped. If the
    /// inbox overflowed, every source of every grid is marked whole-grid
    /// dirty first.
    pub fn drain_notifications(&mut self) -> DrainReport {
        let (batch, overflowed) = self.inbox.drain();
        let mut report = DrainReport {
            overflowed,
            ..DrainReport::default()
        };
        if overflowed {
            warn!("notification inbox overflowed; marking every grid dirty");
            for (_, sources) in self.registry.iter_mut() {
                for source in sources.sources_mut() {
                    source.mark_all();
                }
            }
        }
        for notification in batch {
            match self.route(notification.grid, notification.mutation, &notification.scope) {
                Ok(()) => report.routed += 1,
                Err(e) => {
                    warn!("dropping {:?}: {e}", notification.mutation);
                    report.stale += 1;
                }
            }
        }
        report
    }

    // ── Settings ───────────────────────────────────────────────────

    /// Current cost knobs.
    pub fn settings(&self) -> &CostSettings {
        &self.config.settings
    }

    /// Adopt new cost knobs.
    ///
    /// Per grid: when the set of enabled source kinds is unchanged, every
    /// source is reconfigured in place and marked whole-grid dirty, and
    /// aggregators reconcile on their next read. Otherwise the grid's
    /// sources are rebuilt from `settings` and its aggregators evicted.
    /// Grids created with explicit sources are always reconfigured in place.
    pub fn apply_settings(&mut self, settings: CostSettings) {
        let kinds = waycost_sources::enabled_kinds(&settings);
        self.config.settings = settings;
        for (handle, entry) in self.grids.iter() {
            let Some(sources) = self.registry.get_mut(handle) else {
                continue;
            };
            if entry.custom_sources || sources.kinds() == kinds {
                for source in sources.sources_mut() {
                    source.reconfigure(&self.config.settings);
                    source.mark_all();
                }
                debug!("{handle}: reconfigured sources in place");
                continue;
            }
            drop(self.registry.remove(handle));
            let evicted = self.aggregators.evict_grid(handle);
            self.registry.get_or_create(
                handle,
                entry.layout.cell_count(),
                &self.config.settings,
            );
            debug!("{handle}: rebuilt sources ({evicted} aggregators evicted)");
        }
    }

    /// The source registry.
    pub fn registry(&self) -> &CostSourceRegistry {
        &self.registry
    }
}
