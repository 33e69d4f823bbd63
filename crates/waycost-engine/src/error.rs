//! Facade error type.

use std::error::Error;
use std::fmt;

use waycost_arena::{ArenaError, GridHandle};

use crate::config::ConfigError;

/// Errors returned by [`CostOverlays`](crate::CostOverlays).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayError {
    /// The grid handle was destroyed or never issued.
    UnknownGrid {
        /// The rejected handle.
        handle: GridHandle,
    },
    /// A world view does not match the grid it was passed for.
    WorldSizeMismatch {
        /// The grid's cell count.
        expected: usize,
        /// The world view's cell count.
        actual: usize,
    },
    /// Engine configuration is invalid.
    Config(ConfigError),
    /// A buffer operation failed.
    Arena(ArenaError),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGrid { handle } => write!(f, "unknown grid instance {handle}"),
            Self::WorldSizeMismatch { expected, actual } => {
                write!(f, "world has {actual} cells, grid has {expected}")
            }
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Arena(e) => write!(f, "arena: {e}"),
        }
    }
}

impl Error for OverlayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for OverlayError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ArenaError> for OverlayError {
    fn from(e: ArenaError) -> Self {
        match e {
            ArenaError::StaleHandle { handle } => Self::UnknownGrid { handle },
            other => Self::Arena(other),
        }
    }
}
