//! Row-major [`GridLayout`] and the coordinate types it maps.

use waycost_core::CellIndex;

use crate::error::SpaceError;

/// A 2D cell coordinate: column `x`, row `z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    /// Column, `0 <= x < width`.
    pub x: u32,
    /// Row, `0 <= z < height`.
    pub z: u32,
}

impl CellCoord {
    /// Create a coordinate.
    pub const fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }
}

/// An axis-aligned rectangular footprint of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRect {
    /// Lowest corner (inclusive).
    pub min: CellCoord,
    /// Extent along `x`.
    pub width: u32,
    /// Extent along `z`.
    pub height: u32,
}

impl CellRect {
    /// Create a footprint rooted at `min`.
    pub const fn new(min: CellCoord, width: u32, height: u32) -> Self {
        Self { min, width, height }
    }

    /// A one-cell footprint.
    pub const fn single(at: CellCoord) -> Self {
        Self::new(at, 1, 1)
    }
}

/// The fixed row-major mapping between coordinates and linear cell indices
/// of one grid instance.
///
/// `index = z * width + x`. The layout never changes for the lifetime of the
/// grid instance, which is what allows cost buffers to be sized once and
/// mutated in place forever after.
///
/// # Examples
///
/// ```
/// use waycost_space::{CellCoord, GridLayout};
///
/// let layout = GridLayout::new(10, 10).unwrap();
/// assert_eq!(layout.cell_count(), 100);
/// assert_eq!(layout.index_of(CellCoord::new(5, 0)).unwrap(), 5);
/// assert_eq!(layout.coord_of(23), Some(CellCoord::new(3, 2)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    width: u32,
    height: u32,
}

impl GridLayout {
    /// Create a `width x height` layout.
    ///
    /// Returns `Err(SpaceError::EmptyGrid)` if either dimension is 0, or
    /// `Err(SpaceError::CellCountOverflow)` if the cell count does not fit
    /// in a [`CellIndex`].
    pub fn new(width: u32, height: u32) -> Result<Self, SpaceError> {
        if width == 0 || height == 0 {
            return Err(SpaceError::EmptyGrid);
        }
        (width as usize)
            .checked_mul(height as usize)
            .ok_or(SpaceError::CellCountOverflow { width, height })?;
        Ok(Self { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Whether `coord` lies inside the grid.
    pub fn contains(&self, coord: CellCoord) -> bool {
        coord.x < self.width && coord.z < self.height
    }

    /// Linear index of `coord`.
    pub fn index_of(&self, coord: CellCoord) -> Result<CellIndex, SpaceError> {
        if !self.contains(coord) {
            return Err(SpaceError::CoordOutOfBounds {
                coord,
                width: self.width,
                height: self.height,
            });
        }
        Ok(coord.z as usize * self.width as usize + coord.x as usize)
    }

    /// Coordinate of a linear index, or `None` if out of range.
    pub fn coord_of(&self, cell: CellIndex) -> Option<CellCoord> {
        if cell >= self.cell_count() {
            return None;
        }
        let w = self.width as usize;
        Some(CellCoord::new((cell % w) as u32, (cell / w) as u32))
    }

    /// Linear indices of every cell in `rect`, row by row.
    ///
    /// The rectangle must be non-empty and lie fully inside the grid.
    pub fn rect_cells(&self, rect: CellRect) -> Result<Vec<CellIndex>, SpaceError> {
        let fits = rect.width > 0
            && rect.height > 0
            && rect.min.x.checked_add(rect.width).is_some_and(|e| e <= self.width)
            && rect.min.z.checked_add(rect.height).is_some_and(|e| e <= self.height);
        if !fits {
            return Err(SpaceError::InvalidRect { rect });
        }
        let w = self.width as usize;
        let mut cells = Vec::with_capacity(rect.width as usize * rect.height as usize);
        for z in rect.min.z..rect.min.z + rect.height {
            let row = z as usize * w;
            cells.extend((rect.min.x..rect.min.x + rect.width).map(|x| row + x as usize));
        }
        Ok(cells)
    }

    /// All coordinates in index order.
    pub fn canonical_ordering(&self) -> Vec<CellCoord> {
        (0..self.height)
            .flat_map(|z| (0..self.width).map(move |x| CellCoord::new(x, z)))
            .collect()
    }
}
