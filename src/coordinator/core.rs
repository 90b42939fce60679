//! Core coordinator struct, construction, and accessors.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::download::DownloadTabDelegate;
use crate::error::{Error, Result};
use crate::identifiers::TabId;
use crate::prefs::SavePrefs;
use crate::save::{SaveOperation, SaveService};
use crate::tab::TabContents;

use super::observer::GestureState;
use super::permission::PermissionWaiters;
use super::slot::{ActiveSave, SaveState};

// ============================================================================
// TabDownloadCoordinator
// ============================================================================

/// Per-tab coordinator for page saving and download permission.
///
/// Created alongside its tab and dropped with it. Owns at most one save
/// operation at a time and relays permission queries and download-start
/// notifications to its delegate.
///
/// # Example
///
/// ```ignore
/// let coordinator = Arc::new(TabDownloadCoordinator::new(&tab, save_service));
/// coordinator.set_delegate(Some(&window));
/// tab.observers().add(&(coordinator.clone() as Arc<dyn TabObserver>));
///
/// coordinator.on_save_page();
/// ```
pub struct TabDownloadCoordinator {
    /// Tab this coordinator is attached to.
    pub(super) tab_id: TabId,
    /// Owning tab. Not owned.
    pub(super) tab: Weak<dyn TabContents>,
    /// Starts save operations.
    pub(super) save_service: Arc<dyn SaveService>,
    /// Receives permission queries and notifications. Not owned.
    pub(super) delegate: RwLock<Option<Weak<dyn DownloadTabDelegate>>>,
    /// The single active-save slot.
    pub(super) active_save: Arc<ActiveSave>,
    /// Preferences for destination resolution.
    pub(super) prefs: Mutex<SavePrefs>,
    /// User gesture record.
    pub(super) gestures: Mutex<GestureState>,
    /// Outstanding permission decisions by request.
    pub(super) pending_permissions: Mutex<PermissionWaiters>,
}

impl fmt::Debug for TabDownloadCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabDownloadCoordinator")
            .field("tab_id", &self.tab_id)
            .field("save_state", &self.save_state())
            .field("has_delegate", &self.delegate().is_some())
            .finish_non_exhaustive()
    }
}

impl TabDownloadCoordinator {
    /// Creates a coordinator for `tab` with default save preferences.
    ///
    /// The delegate starts empty.
    #[must_use]
    pub fn new(tab: &Arc<dyn TabContents>, save_service: Arc<dyn SaveService>) -> Self {
        let tab_id = tab.tab_id();
        debug!(tab_id = %tab_id, "Download coordinator created");

        Self {
            tab_id,
            tab: Arc::downgrade(tab),
            save_service,
            delegate: RwLock::new(None),
            active_save: Arc::new(ActiveSave::new(tab_id)),
            prefs: Mutex::new(SavePrefs::default()),
            gestures: Mutex::new(GestureState::default()),
            pending_permissions: Mutex::new(PermissionWaiters::default()),
        }
    }

    /// Replaces the save preferences.
    #[must_use]
    pub fn with_save_prefs(self, prefs: SavePrefs) -> Self {
        *self.prefs.lock() = prefs;
        self
    }
}

// ============================================================================
// TabDownloadCoordinator - Accessors
// ============================================================================

impl TabDownloadCoordinator {
    /// Returns the tab ID.
    #[inline]
    #[must_use]
    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    /// Returns the delegate, if set and still alive.
    #[must_use]
    pub fn delegate(&self) -> Option<Arc<dyn DownloadTabDelegate>> {
        self.delegate.read().as_ref().and_then(Weak::upgrade)
    }

    /// Sets or clears the delegate. The coordinator does not keep it alive.
    pub fn set_delegate(&self, delegate: Option<&Arc<dyn DownloadTabDelegate>>) {
        debug!(tab_id = %self.tab_id, present = delegate.is_some(), "Delegate set");
        *self.delegate.write() = delegate.map(Arc::downgrade);
    }

    /// Returns a copy of the current save preferences.
    #[must_use]
    pub fn save_prefs(&self) -> SavePrefs {
        self.prefs.lock().clone()
    }

    /// Replaces the save preferences.
    pub fn set_save_prefs(&self, prefs: SavePrefs) {
        *self.prefs.lock() = prefs;
    }

    /// Returns whether a save is in progress.
    #[must_use]
    pub fn save_state(&self) -> SaveState {
        self.active_save.state()
    }

    /// Returns `true` if a save is in progress.
    #[inline]
    #[must_use]
    pub fn is_saving(&self) -> bool {
        !self.save_state().is_idle()
    }

    /// Returns the operation managing the current save. May be `None` even
    /// while saving, during the service's `start` call.
    #[must_use]
    pub fn active_save(&self) -> Option<Arc<dyn SaveOperation>> {
        self.active_save.operation()
    }
}

// ============================================================================
// TabDownloadCoordinator - Internal
// ============================================================================

impl TabDownloadCoordinator {
    /// Gets the owning tab or returns an error.
    pub(super) fn tab(&self) -> Result<Arc<dyn TabContents>> {
        self.tab
            .upgrade()
            .ok_or_else(|| Error::tab_closed(self.tab_id))
    }

    /// Fails if a save is already in progress.
    pub(super) fn ensure_idle(&self) -> Result<()> {
        match self.save_state() {
            SaveState::Idle => Ok(()),
            SaveState::Saving(active) => Err(Error::save_in_progress(active)),
        }
    }
}

impl Drop for TabDownloadCoordinator {
    fn drop(&mut self) {
        if let Some(save_id) = self.active_save.clear() {
            debug!(tab_id = %self.tab_id, save_id = %save_id, "Released active save on drop");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
