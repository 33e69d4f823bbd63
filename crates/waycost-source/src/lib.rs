//! The cost source abstraction for waycost.
//!
//! A cost source is one independent contributor to a grid's path costs.
//! It owns a [`CostBuffer`](waycost_arena::CostBuffer), knows how to
//! recompute it fully or for a set of cells, and tracks cells it knows
//! changed beyond what its caller reports. Every recompute is published to
//! a bounded [`ChangeJournal`] so that aggregators can later pull exactly
//! the cells they have not merged yet.
//!
//! Most contributors are pure per-cell functions of world state; those
//! implement [`CellRule`] and get the full [`CostSource`] contract from
//! [`RuleSource`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod journal;
pub mod kind;
pub mod overlay;
pub mod rule;
pub mod source;
pub mod state;

pub use journal::{Catchup, Change, ChangeJournal};
pub use kind::SourceKind;
pub use overlay::WrappedOverlay;
pub use rule::{CellRule, RuleSource};
pub use source::CostSource;
pub use state::{SourceState, SourceStats};
