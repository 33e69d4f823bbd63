//! Grid geometry for waycost cost overlays.
//!
//! A grid instance is a `width x height` lattice of cells addressed either
//! by 2D [`CellCoord`] or by the linear row-major [`CellIndex`] that every
//! cost buffer is indexed with. [`GridLayout`] owns that bijection;
//! [`CellRect`] describes multi-cell footprints such as wide doors.
//!
//! [`CellIndex`]: waycost_core::CellIndex

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod layout;

pub use error::SpaceError;
pub use layout::{CellCoord, CellRect, GridLayout};
