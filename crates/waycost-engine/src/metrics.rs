//! Per-aggregator merge counters.

/// Work done by one aggregator since creation.
///
/// Read by tests and benchmarks to confirm that reconciliation touched
/// only what it had to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeMetrics {
    /// Reads that re-merged every cell.
    pub full_merges: u64,
    /// Reads that re-merged only dirty cells.
    pub partial_merges: u64,
    /// Reads with nothing to reconcile.
    pub clean_reads: u64,
    /// Reads served straight from a single source's buffer.
    pub shared_reads: u64,
    /// Cells re-merged across all reads.
    pub cells_merged: u64,
}

impl MergeMetrics {
    /// Total reads of any kind.
    pub fn reads(&self) -> u64 {
        self.full_merges + self.partial_merges + self.clean_reads + self.shared_reads
    }
}
