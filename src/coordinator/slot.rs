//! The coordinator's single active-save slot.
//!
//! Shared between the coordinator (strong) and every [`SaveCompletion`]
//! handed to the save service (weak), so a completion arriving after the
//! coordinator is gone is a no-op.
//!
//! [`SaveCompletion`]: super::SaveCompletion

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::identifiers::{SaveId, TabId};
use crate::save::{SaveOperation, SaveOutcome};

// ============================================================================
// SaveState
// ============================================================================

/// Observable state of a coordinator's save slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveState {
    /// No save in progress.
    Idle,
    /// A save is starting or running.
    Saving(SaveId),
}

impl SaveState {
    /// Returns `true` for [`SaveState::Idle`].
    #[inline]
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

// ============================================================================
// Slot
// ============================================================================

/// Slot contents. `Starting` covers the window in which the save service's
/// `start` is running and no lock is held.
enum Slot {
    Idle,
    Starting(SaveId),
    Saving {
        id: SaveId,
        operation: Arc<dyn SaveOperation>,
    },
}

impl Slot {
    fn id(&self) -> Option<SaveId> {
        match self {
            Self::Idle => None,
            Self::Starting(id) | Self::Saving { id, .. } => Some(*id),
        }
    }
}

// ============================================================================
// ActiveSave
// ============================================================================

/// Holds at most one save operation for one tab.
pub(crate) struct ActiveSave {
    tab_id: TabId,
    slot: Mutex<Slot>,
}

impl fmt::Debug for ActiveSave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveSave")
            .field("tab_id", &self.tab_id)
            .field("state", &self.state())
            .finish()
    }
}

impl ActiveSave {
    /// Creates an empty slot.
    pub(crate) fn new(tab_id: TabId) -> Self {
        Self {
            tab_id,
            slot: Mutex::new(Slot::Idle),
        }
    }

    /// Returns the current state.
    pub(crate) fn state(&self) -> SaveState {
        match self.slot.lock().id() {
            Some(id) => SaveState::Saving(id),
            None => SaveState::Idle,
        }
    }

    /// Returns the running operation, if it has been installed.
    pub(crate) fn operation(&self) -> Option<Arc<dyn SaveOperation>> {
        match &*self.slot.lock() {
            Slot::Saving { operation, .. } => Some(Arc::clone(operation)),
            _ => None,
        }
    }

    /// Claims the slot for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SaveInProgress`] if the slot is taken; the slot is
    /// left untouched.
    pub(crate) fn reserve(&self, id: SaveId) -> Result<()> {
        let mut slot = self.slot.lock();
        if let Some(active) = slot.id() {
            return Err(Error::save_in_progress(active));
        }
        *slot = Slot::Starting(id);
        Ok(())
    }

    /// Stores the operation started for reservation `id`.
    ///
    /// Returns `false` if the reservation is gone, which happens when the
    /// save finished before `start` returned.
    pub(crate) fn install(&self, id: SaveId, operation: Arc<dyn SaveOperation>) -> bool {
        let mut slot = self.slot.lock();
        match *slot {
            Slot::Starting(reserved) if reserved == id => {
                *slot = Slot::Saving { id, operation };
                true
            }
            _ => false,
        }
    }

    /// Drops reservation `id` after a failed start.
    pub(crate) fn release(&self, id: SaveId) {
        let mut slot = self.slot.lock();
        if slot.id() == Some(id) {
            *slot = Slot::Idle;
        }
    }

    /// Handles the completion signal of save `id`.
    ///
    /// Returns `true` if the slot was cleared. Signals for any other save
    /// are ignored.
    pub(crate) fn finish(&self, id: SaveId, outcome: &SaveOutcome) -> bool {
        let cleared = {
            let mut slot = self.slot.lock();
            if slot.id() == Some(id) {
                // Dropped after the lock is released.
                Some(std::mem::replace(&mut *slot, Slot::Idle))
            } else {
                None
            }
        };

        match (cleared.is_some(), outcome) {
            (false, _) => {
                debug!(tab_id = %self.tab_id, save_id = %id, "Completion for inactive save ignored");
                false
            }
            (true, SaveOutcome::Completed) => {
                info!(tab_id = %self.tab_id, save_id = %id, "Save completed");
                true
            }
            (true, SaveOutcome::Failed { reason }) => {
                warn!(tab_id = %self.tab_id, save_id = %id, %reason, "Save failed");
                true
            }
            (true, SaveOutcome::Cancelled) => {
                info!(tab_id = %self.tab_id, save_id = %id, "Save cancelled");
                true
            }
        }
    }

    /// Empties the slot without waiting for the operation.
    pub(crate) fn clear(&self) -> Option<SaveId> {
        let previous = std::mem::replace(&mut *self.slot.lock(), Slot::Idle);
        previous.id()
    }
}

// ============================================================================
// Tests
// ============================================================================
