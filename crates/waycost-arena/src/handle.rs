//! Generational slot arena for grid instances.
//!
//! Each grid instance's state lives in one slot. A [`GridHandle`] packs the
//! slot index with the slot's generation, so a handle to a destroyed grid
//! stays stale even after a new grid reuses the slot.

use std::fmt;

use crate::error::ArenaError;

/// Handle encoding: upper 32 bits = slot index, lower 32 bits = generation.
fn encode(slot: u32, generation: u32) -> u64 {
    ((slot as u64) << 32) | (generation as u64)
}

fn decode(raw: u64) -> (u32, u32) {
    ((raw >> 32) as u32, raw as u32)
}

/// Opaque identity of one grid instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridHandle(u64);

impl GridHandle {
    /// Rebuild a handle from its raw encoding, e.g. one round-tripped
    /// through a host's own bookkeeping.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw encoding.
    pub fn into_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GridHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = decode(self.0);
        write!(f, "grid#{slot}.{generation}")
    }
}

struct Slot<T> {
    generation: u32,
    data: Option<T>,
}

/// A slot + generation table mapping [`GridHandle`]s to owned values.
///
/// Reuses slots via a free list. Generation counters increment on removal,
/// making stale handles detectable.
pub struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
    live: usize,
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HandleTable<T> {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Insert a value and return its handle.
    pub fn insert(&mut self, value: T) -> GridHandle {
        self.live += 1;
        if let Some(slot_idx) = self.free_list.pop() {
            let slot = &mut self.slots[slot_idx as usize];
            slot.data = Some(value);
            GridHandle(encode(slot_idx, slot.generation))
        } else {
            let slot_idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                data: Some(value),
            });
            GridHandle(encode(slot_idx, 0))
        }
    }

    /// Value behind a handle, or `None` if stale.
    pub fn get(&self, handle: GridHandle) -> Option<&T> {
        let (slot_idx, generation) = decode(handle.0);
        let slot = self.slots.get(slot_idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.data.as_ref()
    }

    /// Mutable value behind a handle, or `None` if stale.
    pub fn get_mut(&mut self, handle: GridHandle) -> Option<&mut T> {
        let (slot_idx, generation) = decode(handle.0);
        let slot = self.slots.get_mut(slot_idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.data.as_mut()
    }

    /// Like [`get`](Self::get), reporting a stale handle as an error.
    pub fn try_get(&self, handle: GridHandle) -> Result<&T, ArenaError> {
        self.get(handle).ok_or(ArenaError::StaleHandle { handle })
    }

    /// Whether `handle` is live.
    pub fn contains(&self, handle: GridHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Remove the value behind a handle, returning it.
    ///
    /// Double-remove is a safe no-op returning `None`. A slot whose
    /// generation wraps back to zero is retired rather than recycled, since
    /// reuse would resurrect handles from its first epoch.
    pub fn remove(&mut self, handle: GridHandle) -> Option<T> {
        let (slot_idx, generation) = decode(handle.0);
        let slot = self.slots.get_mut(slot_idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        let value = slot.data.take()?;
        self.live -= 1;
        slot.generation = slot.generation.wrapping_add(1);
        if slot.generation != 0 {
            self.free_list.push(slot_idx);
        }
        Some(value)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether the table has no live entries.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Handles of every live entry, in slot order.
    pub fn handles(&self) -> Vec<GridHandle> {
        self.iter().map(|(h, _)| h).collect()
    }

    /// Iterate over live entries.
    pub fn iter(&self) -> impl Iterator<Item = (GridHandle, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.data
                .as_ref()
                .map(|d| (GridHandle(encode(i as u32, slot.generation)), d))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_round_trip() {
        let mut table = HandleTable::new();
        let h = table.insert("grid");
        assert_eq!(table.get(h), Some(&"grid"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn removed_handle_goes_stale_across_slot_reuse() {
        let mut table = HandleTable::new();
        let old = table.insert(1);
        assert_eq!(table.remove(old), Some(1));
        let new = table.insert(2);
        assert_ne!(old, new);
        assert_eq!(table.get(old), None);
        assert_eq!(table.get_mut(old), None);
        assert_eq!(table.get(new), Some(&2));
    }

    #[test]
    fn try_get_reports_stale_handle() {
        let mut table = HandleTable::new();
        let h = table.insert(3);
        table.remove(h);
        assert_eq!(table.try_get(h), Err(ArenaError::StaleHandle { handle: h }));
    }

    #[test]
    fn double_remove_is_noop() {
        let mut table = HandleTable::new();
        let h = table.insert(1);
        assert_eq!(table.remove(h), Some(1));
        assert_eq!(table.remove(h), None);
        assert!(table.is_empty());
    }

    #[test]
    fn forged_handle_is_rejected() {
        let table: HandleTable<u8> = HandleTable::new();
        assert_eq!(table.get(GridHandle::from_raw(encode(7, 0))), None);
    }

    #[test]
    fn wrapped_generation_retires_slot() {
        let mut table = HandleTable::new();
        table.insert(0u8);
        table.slots[0].generation = u32::MAX;
        let h_max = GridHandle(encode(0, u32::MAX));
        assert_eq!(table.remove(h_max), Some(0));
        assert!(table.free_list.is_empty());
        let fresh = table.insert(1);
        assert_eq!(decode(fresh.0).0, 1);
    }

    #[test]
    fn iter_yields_live_handles_only() {
        let mut table = HandleTable::new();
        let a = table.insert('a');
        let b = table.insert('b');
        table.remove(a);
        let handles: Vec<_> = table.iter().map(|(h, v)| (h, *v)).collect();
        assert_eq!(handles, vec![(b, 'b')]);
        assert_eq!(table.handles(), vec![b]);
    }
}
