//! Cross-thread mutation inbox.
//!
//! Producers that live on other threads (world editors, weather, the room
//! solver) post notifications through a cloneable [`Notifier`] instead of
//! touching engine state. [`CostOverlays::drain_notifications`] routes them
//! on the engine's thread. Posting never blocks: when the bounded channel is
//! full the notifier raises an overflow flag, and the next drain dirties
//! every source of every grid so no change is lost.
//!
//! [`CostOverlays::drain_notifications`]: crate::CostOverlays::drain_notifications

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use log::{debug, warn};
use waycost_arena::GridHandle;
use waycost_core::CellIndex;

use crate::routing::MutationKind;

/// Cells a notification covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeScope {
    /// One cell.
    Cell(CellIndex),
    /// A set of cells.
    Cells(Vec<CellIndex>),
    /// Every cell.
    All,
}

/// One queued mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Grid instance the mutation happened on.
    pub grid: GridHandle,
    /// What changed.
    pub mutation: MutationKind,
    /// Where it changed.
    pub scope: ChangeScope,
}

/// Outcome of one [`drain_notifications`](crate::CostOverlays::drain_notifications).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Notifications routed to live grids.
    pub routed: usize,
    /// Notifications dropped because their grid is gone.
    pub stale: usize,
    /// Whether the inbox overflowed since the previous drain.
    pub overflowed: bool,
}

/// Non-blocking sender half of the inbox.
#[derive(Clone)]
pub struct Notifier {
    tx: Sender<Notification>,
    overflowed: Arc<AtomicBool>,
}

impl Notifier {
    /// Post a single-cell change.
    pub fn cell_changed(&self, grid: GridHandle, mutation: MutationKind, cell: CellIndex) {
        self.post(Notification {
            grid,
            mutation,
            scope: ChangeScope::Cell(cell),
        });
    }

    /// Post a multi-cell change.
    pub fn cells_changed(&self, grid: GridHandle, mutation: MutationKind, cells: Vec<CellIndex>) {
        self.post(Notification {
            grid,
            mutation,
            scope: ChangeScope::Cells(cells),
        });
    }

    /// Post a whole-grid change.
    pub fn all_changed(&self, grid: GridHandle, mutation: MutationKind) {
        self.post(Notification {
            grid,
            mutation,
            scope: ChangeScope::All,
        });
    }

    /// Queue `notification`, raising the overflow flag if the inbox is full.
    pub fn post(&self, notification: Notification) {
        match self.tx.try_send(notification) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                if !self.overflowed.swap(true, Ordering::AcqRel) {
                    warn!(
                        "notification inbox full, dropping {:?} on {}; next drain dirties every grid",
                        dropped.mutation, dropped.grid
                    );
                }
            }
            Err(TrySendError::Disconnected(_)) => {
                debug!("notification posted after the engine was dropped");
            }
        }
    }
}

pub(crate) struct Inbox {
    rx: Receiver<Notification>,
    notifier: Notifier,
}

impl Inbox {
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        Self {
            rx,
            notifier: Notifier {
                tx,
                overflowed: Arc::new(AtomicBool::new(false)),
            },
        }
    }

    pub(crate) fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }

    /// Everything queued so far, plus whether anything was dropped.
    ///
    /// The overflow flag is cleared before the queue is read, so a drop
    /// racing the drain is seen by the next drain at the latest.
    pub(crate) fn drain(&self) -> (Vec<Notification>, bool) {
        let overflowed = self.notifier.overflowed.swap(false, Ordering::AcqRel);
        (self.rx.try_iter().collect(), overflowed)
    }
}
