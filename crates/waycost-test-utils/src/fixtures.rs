//! Reusable cost-source and overlay fixtures.
//!
//! - [`TableSource`]: a source whose per-cell rule reads a shared
//!   [`CostTable`] the test mutates, counting every evaluation.
//! - [`const_source`]: a table source filled with one constant.
//! - [`MockOverlay`]: a [`WrappedOverlay`] with explicit version bumps.

use std::sync::atomic::{AtomicU16, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use waycost_arena::{CostBuffer, CostGrid};
use waycost_core::{CellIndex, Cost, CostSettings, OverlayId, WorldView};
use waycost_source::{CellRule, RuleSource, SourceKind, WrappedOverlay};

/// Shared per-cell costs a [`TableRule`] reads, plus an evaluation counter.
pub struct CostTable {
    cells: Vec<AtomicU16>,
    evaluations: AtomicUsize,
}

impl CostTable {
    pub fn new(cell_count: usize, initial: Cost) -> Arc<Self> {
        Arc::new(Self {
            cells: (0..cell_count).map(|_| AtomicU16::new(initial)).collect(),
            evaluations: AtomicUsize::new(0),
        })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, cell: CellIndex) -> Cost {
        self.cells
            .get(cell)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn set(&self, cell: CellIndex, cost: Cost) {
        self.cells[cell].store(cost, Ordering::Relaxed);
    }

    pub fn fill(&self, cost: Cost) {
        for c in &self.cells {
            c.store(cost, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> Vec<Cost> {
        (0..self.len()).map(|c| self.get(c)).collect()
    }

    /// Number of per-cell rule evaluations since creation or the last reset.
    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }

    pub fn reset_evaluations(&self) {
        self.evaluations.store(0, Ordering::Relaxed);
    }
}

/// Rule returning the current [`CostTable`] entry for each cell.
pub struct TableRule {
    kind: SourceKind,
    table: Arc<CostTable>,
}

impl CellRule for TableRule {
    type Frame = ();

    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn prepare(&self, _world: &dyn WorldView) {}

    fn cost_at(&self, _: &(), _world: &dyn WorldView, cell: CellIndex) -> Cost {
        self.table.evaluations.fetch_add(1, Ordering::Relaxed);
        self.table.get(cell)
    }

    fn reconfigure(&mut self, _settings: &CostSettings) {}
}

/// A source backed by a [`CostTable`].
pub type TableSource = RuleSource<TableRule>;

/// Source of `kind` reading `table`.
pub fn table_source(kind: SourceKind, table: Arc<CostTable>, journal_capacity: usize) -> TableSource {
    let n = table.len();
    RuleSource::new(TableRule { kind, table }, n, journal_capacity)
}

/// Source of `kind` contributing `cost` on every cell. The returned table
/// can be mutated to change the rule afterwards.
pub fn const_source(kind: SourceKind, cell_count: usize, cost: Cost) -> (TableSource, Arc<CostTable>) {
    let table = CostTable::new(cell_count, cost);
    (table_source(kind, Arc::clone(&table), 64), table)
}

/// Externally supplied overlay whose content and version the test drives.
pub struct MockOverlay {
    id: OverlayId,
    buffer: Mutex<CostBuffer>,
    grid: CostGrid,
    version: AtomicU64,
}

impl MockOverlay {
    pub fn new(cell_count: usize, initial: Cost) -> Arc<Self> {
        let mut buffer = CostBuffer::new(cell_count);
        buffer.fill(initial);
        let grid = buffer.share();
        Arc::new(Self {
            id: OverlayId::next(),
            buffer: Mutex::new(buffer),
            grid,
            version: AtomicU64::new(0),
        })
    }

    /// Change a cell without bumping the version.
    pub fn set_silently(&self, cell: CellIndex, cost: Cost) {
        self.buffer.lock().unwrap().set(cell, cost);
    }

    /// Change a cell and bump the version.
    pub fn set(&self, cell: CellIndex, cost: Cost) {
        self.set_silently(cell, cost);
        self.bump_version();
    }

    pub fn bump_version(&self) {
        self.version.fetch_add(1, Ordering::Release);
    }
}

impl WrappedOverlay for MockOverlay {
    fn overlay_id(&self) -> OverlayId {
        self.id
    }

    fn grid(&self) -> CostGrid {
        self.grid.clone()
    }

    fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }
}
