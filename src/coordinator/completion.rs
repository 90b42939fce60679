//! Completion handle given to the save service with every started save.

use std::fmt;
use std::sync::{Arc, Weak};

use tracing::debug;

use crate::identifiers::SaveId;
use crate::save::SaveOutcome;

use super::slot::ActiveSave;

// ============================================================================
// SaveCompletion
// ============================================================================

/// Reports the end of one save operation back to its coordinator.
///
/// The save service receives one with each [`SaveRequest`] and calls
/// [`finish`](Self::finish) when the operation ends, which returns the
/// coordinator to idle. Dropping the handle without finishing reports
/// [`SaveOutcome::Cancelled`]. If the coordinator is already gone the
/// signal is discarded.
///
/// [`SaveRequest`]: crate::save::SaveRequest
pub struct SaveCompletion {
    save_id: SaveId,
    slot: Weak<ActiveSave>,
    finished: bool,
}

impl fmt::Debug for SaveCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SaveCompletion")
            .field("save_id", &self.save_id)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl SaveCompletion {
    /// Creates the handle for save `save_id`.
    pub(crate) fn new(save_id: SaveId, slot: &Arc<ActiveSave>) -> Self {
        Self {
            save_id,
            slot: Arc::downgrade(slot),
            finished: false,
        }
    }

    /// Returns the save this handle reports for.
    #[inline]
    #[must_use]
    pub fn save_id(&self) -> SaveId {
        self.save_id
    }

    /// Reports the terminal outcome.
    pub fn finish(mut self, outcome: SaveOutcome) {
        self.finished = true;
        self.deliver(&outcome);
    }

    fn deliver(&self, outcome: &SaveOutcome) {
        match self.slot.upgrade() {
            Some(slot) => {
                slot.finish(self.save_id, outcome);
            }
            None => {
                debug!(save_id = %self.save_id, ?outcome, "Coordinator gone, completion discarded");
            }
        }
    }
}

impl Drop for SaveCompletion {
    fn drop(&mut self) {
        if !self.finished {
            self.deliver(&SaveOutcome::Cancelled);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
