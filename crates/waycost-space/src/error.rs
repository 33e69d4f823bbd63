//! Error types for grid layout construction and coordinate queries.

use std::fmt;

use crate::layout::{CellCoord, CellRect};

/// Errors arising from layout construction or coordinate mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceError {
    /// A coordinate is outside the grid.
    CoordOutOfBounds {
        /// The offending coordinate.
        coord: CellCoord,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// A footprint rectangle is empty or leaves the grid.
    InvalidRect {
        /// The offending rectangle.
        rect: CellRect,
    },
    /// Attempted to construct a layout with zero cells.
    EmptyGrid,
    /// `width * height` does not fit in a cell index.
    CellCountOverflow {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoordOutOfBounds {
                coord,
                width,
                height,
            } => write!(
                f,
                "coordinate ({}, {}) out of bounds for {width}x{height} grid",
                coord.x, coord.z
            ),
            Self::InvalidRect { rect } => write!(
                f,
                "invalid footprint at ({}, {}) of size {}x{}",
                rect.min.x, rect.min.z, rect.width, rect.height
            ),
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::CellCountOverflow { width, height } => {
                write!(f, "{width}x{height} grid overflows the cell index range")
            }
        }
    }
}

impl std::error::Error for SpaceError {}
