//! Cell indices and the [`CellSet`] dirty set.

/// Linear row-major index of a cell within one grid instance.
pub type CellIndex = usize;

/// A deduplicated set of cell indices.
///
/// Backed by a growable bitset for O(1) membership plus an insertion-ordered
/// member list for iteration proportional to the set size rather than the
/// grid size. Dirty sets are usually tiny compared to the grid, so
/// `clear()` only touches the words that were actually set.
#[derive(Clone, Debug, Default)]
pub struct CellSet {
    bits: Vec<u64>,
    members: Vec<CellIndex>,
}

impl CellSet {
    const BITS_PER_WORD: usize = 64;

    /// Create an empty cell set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set pre-sized for a grid of `cell_count` cells.
    pub fn with_cell_count(cell_count: usize) -> Self {
        Self {
            bits: vec![0; cell_count.div_ceil(Self::BITS_PER_WORD)],
            members: Vec::new(),
        }
    }

    /// Insert a cell. Returns `true` if it was not already present.
    pub fn insert(&mut self, cell: CellIndex) -> bool {
        let word = cell / Self::BITS_PER_WORD;
        let bit = 1u64 << (cell % Self::BITS_PER_WORD);
        if word >= self.bits.len() {
            self.bits.resize(word + 1, 0);
        }
        if self.bits[word] & bit != 0 {
            return false;
        }
        self.bits[word] |= bit;
        self.members.push(cell);
        true
    }

    /// Check whether the set contains a cell.
    pub fn contains(&self, cell: CellIndex) -> bool {
        let word = cell / Self::BITS_PER_WORD;
        let bit = 1u64 << (cell % Self::BITS_PER_WORD);
        word < self.bits.len() && self.bits[word] & bit != 0
    }

    /// Iterate over members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.members.iter().copied()
    }

    /// Members as a slice, in insertion order.
    pub fn as_slice(&self) -> &[CellIndex] {
        &self.members
    }

    /// Number of cells in the set.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Remove every member, keeping the allocation.
    pub fn clear(&mut self) {
        for &cell in &self.members {
            self.bits[cell / Self::BITS_PER_WORD] = 0;
        }
        self.members.clear();
    }

    /// Move every member out of the set, leaving it empty.
    pub fn take(&mut self) -> Vec<CellIndex> {
        let members = std::mem::take(&mut self.members);
        for &cell in &members {
            self.bits[cell / Self::BITS_PER_WORD] = 0;
        }
        members
    }
}

impl Extend<CellIndex> for CellSet {
    fn extend<T: IntoIterator<Item = CellIndex>>(&mut self, iter: T) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

impl FromIterator<CellIndex> for CellSet {
    fn from_iter<T: IntoIterator<Item = CellIndex>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl PartialEq for CellSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|c| other.contains(c))
    }
}

impl Eq for CellSet {}
