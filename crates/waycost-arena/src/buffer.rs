//! Single-writer cost buffers with shared read views.
//!
//! A [`CostBuffer`] is the canonical owner of one cost array. Handing out a
//! [`CostGrid`] via [`CostBuffer::share`] never transfers ownership: when the
//! buffer is dropped the allocation is marked retired, and views still held
//! elsewhere can detect that with [`CostGrid::is_retired`]. Cells are relaxed
//! 16-bit atomics, so concurrent readers see each cell either before or after
//! a write and nothing in between.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};
use std::sync::Arc;

use waycost_core::{CellIndex, Cost};

use crate::error::ArenaError;

struct Cells {
    data: Box<[AtomicU16]>,
    retired: AtomicBool,
}

impl Cells {
    fn zeroed(len: usize) -> Arc<Self> {
        Arc::new(Self {
            data: (0..len).map(|_| AtomicU16::new(0)).collect(),
            retired: AtomicBool::new(false),
        })
    }
}

/// Exclusively-owned, fixed-length cost array.
///
/// Every write takes `&mut self`, so the borrow checker enforces the
/// single-writer rule. Not `Clone`: there is exactly one owner.
///
/// # Examples
///
/// ```
/// use waycost_arena::CostBuffer;
///
/// let mut buf = CostBuffer::new(4);
/// let view = buf.share();
/// buf.set(2, 30);
/// assert_eq!(view.to_vec(), vec![0, 0, 30, 0]);
///
/// drop(buf);
/// assert!(view.is_retired());
/// ```
pub struct CostBuffer {
    cells: Arc<Cells>,
}

impl CostBuffer {
    /// Allocate a zero-filled buffer of `len` cells.
    pub fn new(len: usize) -> Self {
        Self {
            cells: Cells::zeroed(len),
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.data.len()
    }

    /// Whether the buffer has zero cells.
    pub fn is_empty(&self) -> bool {
        self.cells.data.is_empty()
    }

    /// Cost at `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= len()`.
    pub fn get(&self, cell: CellIndex) -> Cost {
        self.cells.data[cell].load(Ordering::Relaxed)
    }

    /// Overwrite the cost at `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= len()`.
    pub fn set(&mut self, cell: CellIndex, cost: Cost) {
        self.cells.data[cell].store(cost, Ordering::Relaxed);
    }

    /// Set every cell to `cost`.
    pub fn fill(&mut self, cost: Cost) {
        for slot in self.cells.data.iter() {
            slot.store(cost, Ordering::Relaxed);
        }
    }

    /// Reset every cell to zero.
    pub fn clear(&mut self) {
        self.fill(0);
    }

    /// Overwrite the whole buffer from `costs`.
    pub fn copy_from_slice(&mut self, costs: &[Cost]) -> Result<(), ArenaError> {
        if costs.len() != self.len() {
            return Err(ArenaError::LengthMismatch {
                expected: self.len(),
                actual: costs.len(),
            });
        }
        for (slot, &cost) in self.cells.data.iter().zip(costs) {
            slot.store(cost, Ordering::Relaxed);
        }
        Ok(())
    }

    /// Copy the current contents out.
    pub fn snapshot(&self) -> Vec<Cost> {
        self.cells.data.iter().map(|c| c.load(Ordering::Relaxed)).collect()
    }

    /// A read view sharing this buffer's allocation.
    pub fn share(&self) -> CostGrid {
        CostGrid {
            cells: Arc::clone(&self.cells),
        }
    }
}

impl Drop for CostBuffer {
    fn drop(&mut self) {
        self.cells.retired.store(true, Ordering::Release);
    }
}

impl fmt::Debug for CostBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CostBuffer").field("len", &self.len()).finish()
    }
}

/// Cheap, cloneable read view of a [`CostBuffer`].
///
/// This is what the pathfinder receives. The view keeps the allocation
/// alive but not the owner: once the owning buffer is dropped no further
/// writes happen and [`is_retired`](CostGrid::is_retired) reports `true`.
#[derive(Clone)]
pub struct CostGrid {
    cells: Arc<Cells>,
}

impl CostGrid {
    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.data.len()
    }

    /// Whether the grid has zero cells.
    pub fn is_empty(&self) -> bool {
        self.cells.data.is_empty()
    }

    /// Cost at `cell`, or `None` if out of range.
    pub fn get(&self, cell: CellIndex) -> Option<Cost> {
        self.cells.data.get(cell).map(|c| c.load(Ordering::Relaxed))
    }

    /// Cost at `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= len()`.
    pub fn at(&self, cell: CellIndex) -> Cost {
        self.cells.data[cell].load(Ordering::Relaxed)
    }

    /// Iterate over every cell's cost in index order.
    pub fn iter(&self) -> impl Iterator<Item = Cost> + '_ {
        self.cells.data.iter().map(|c| c.load(Ordering::Relaxed))
    }

    /// Copy the current contents out.
    pub fn to_vec(&self) -> Vec<Cost> {
        self.iter().collect()
    }

    /// Whether the owning buffer has been dropped.
    pub fn is_retired(&self) -> bool {
        self.cells.retired.load(Ordering::Acquire)
    }

    /// Whether two views share the same allocation.
    pub fn ptr_eq(&self, other: &CostGrid) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }
}

impl fmt::Debug for CostGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CostGrid")
            .field("len", &self.len())
            .field("retired", &self.is_retired())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_buffer_is_zeroed() {
        let buf = CostBuffer::new(8);
        assert_eq!(buf.snapshot(), vec![0; 8]);
    }

    #[test]
    fn view_observes_in_place_writes() {
        let mut buf = CostBuffer::new(3);
        let view = buf.share();
        buf.fill(7);
        buf.set(1, 9);
        assert_eq!(view.to_vec(), vec![7, 9, 7]);
        assert!(view.ptr_eq(&buf.share()));
    }

    #[test]
    fn copy_from_slice_rejects_wrong_length() {
        let mut buf = CostBuffer::new(2);
        assert_eq!(
            buf.copy_from_slice(&[1, 2, 3]),
            Err(ArenaError::LengthMismatch {
                expected: 2,
                actual: 3
            })
        );
        buf.copy_from_slice(&[4, 5]).unwrap();
        assert_eq!(buf.snapshot(), vec![4, 5]);
    }

    #[test]
    fn dropping_owner_retires_views() {
        let buf = CostBuffer::new(2);
        let view = buf.share();
        assert!(!view.is_retired());
        drop(buf);
        assert!(view.is_retired());
        // Still readable; the allocation outlives the owner.
        assert_eq!(view.to_vec(), vec![0, 0]);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let view = CostBuffer::new(2).share();
        assert_eq!(view.get(2), None);
    }

    #[test]
    fn concurrent_readers_see_only_written_values() {
        let mut buf = CostBuffer::new(64);
        let view = buf.share();
        std::thread::scope(|s| {
            s.spawn(|| {
                for _ in 0..1000 {
                    for c in view.iter() {
                        assert!(c == 0 || c == 11);
                    }
                }
            });
            for _ in 0..100 {
                buf.fill(11);
                buf.clear();
            }
        });
    }

    proptest! {
        #[test]
        fn snapshot_matches_writes(writes in prop::collection::vec((0usize..32, any::<u16>()), 0..64)) {
            let mut buf = CostBuffer::new(32);
            let mut model = vec![0u16; 32];
            for (cell, cost) in writes {
                buf.set(cell, cost);
                model[cell] = cost;
            }
            prop_assert_eq!(buf.snapshot(), model);
        }
    }
}
