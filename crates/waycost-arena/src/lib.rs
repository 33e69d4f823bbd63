//! Buffer ownership and grid-instance arena for waycost.
//!
//! Two concerns live here:
//!
//! - [`CostBuffer`] / [`CostGrid`]: a fixed-length cost array with exactly
//!   one writer and any number of cheap read views. The allocation is never
//!   resized, so a reader racing a writer observes stale-but-valid costs,
//!   never torn memory.
//! - [`HandleTable`] / [`GridHandle`]: a slot + generation arena that owns
//!   per-grid-instance state. Destroyed handles go stale and are rejected
//!   instead of aliasing a newer grid that reuses the slot.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod error;
pub mod handle;

pub use buffer::{CostBuffer, CostGrid};
pub use error::ArenaError;
pub use handle::{GridHandle, HandleTable};
