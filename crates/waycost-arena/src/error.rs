//! Arena error types.

use std::fmt;

use crate::handle::GridHandle;

/// Errors from buffer and handle-table operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The handle was destroyed or never issued by this table.
    StaleHandle {
        /// The rejected handle.
        handle: GridHandle,
    },
    /// A bulk write did not match the buffer length.
    LengthMismatch {
        /// Buffer length.
        expected: usize,
        /// Length of the data offered.
        actual: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleHandle { handle } => write!(f, "stale grid handle {handle}"),
            Self::LengthMismatch { expected, actual } => {
                write!(f, "length mismatch: buffer has {expected} cells, got {actual}")
            }
        }
    }
}

impl std::error::Error for ArenaError {}
