//! Error types for cost values, knob tables and integration-boundary enums.

use std::error::Error;
use std::fmt;

/// Errors from decoding categories and knobs at the integration boundary.
///
/// Steady-state per-cell lookups never produce these; absent world data
/// simply costs zero. They surface only where an external collaborator
/// hands the core a raw discriminant or a persisted knob table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CostError {
    /// A raw value did not name a [`TraversalCategory`](crate::TraversalCategory).
    UnknownCategory {
        /// The rejected discriminant.
        value: u8,
    },
    /// A raw value did not name a [`DoorPriority`](crate::DoorPriority).
    UnknownDoorPriority {
        /// The rejected discriminant.
        value: u8,
    },
    /// A persisted knob key is not part of the settings table.
    UnknownKnob {
        /// The unrecognised key.
        name: String,
    },
    /// A persisted knob value does not fit in a cost.
    InvalidKnobValue {
        /// The knob key.
        name: String,
        /// The rejected value.
        value: i64,
    },
    /// A cell index lies outside the grid it was applied to.
    CellOutOfRange {
        /// The offending cell index.
        cell: usize,
        /// Number of cells in the grid.
        cell_count: usize,
    },
}

impl fmt::Display for CostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCategory { value } => {
                write!(f, "unknown traversal category discriminant {value}")
            }
            Self::UnknownDoorPriority { value } => {
                write!(f, "unknown door priority discriminant {value}")
            }
            Self::UnknownKnob { name } => write!(f, "unknown cost knob '{name}'"),
            Self::InvalidKnobValue { name, value } => {
                write!(f, "cost knob '{name}' value {value} is outside 0..=65535")
            }
            Self::CellOutOfRange { cell, cell_count } => {
                write!(f, "cell {cell} out of range for grid of {cell_count} cells")
            }
        }
    }
}

impl Error for CostError {}
