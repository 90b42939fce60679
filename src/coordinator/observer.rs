//! Tab observer hooks: renderer messages and user gestures.

use tracing::{debug, trace, warn};

use crate::protocol::{ParsedMessage, RendererMessage};
use crate::save::SaveOperation;
use crate::tab::TabObserver;

use super::TabDownloadCoordinator;

// ============================================================================
// GestureState
// ============================================================================

/// User gestures seen by one tab.
///
/// `since_navigation` is cleared on every main-frame navigation commit, so
/// a gesture on one document never authorizes downloads from the next.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct GestureState {
    since_navigation: bool,
    total: u64,
}

// ============================================================================
// TabDownloadCoordinator - Gestures
// ============================================================================

impl TabDownloadCoordinator {
    /// Returns `true` if the user interacted with the tab since its last
    /// main-frame navigation.
    #[must_use]
    pub fn has_user_gesture(&self) -> bool {
        self.gestures.lock().since_navigation
    }

    /// Number of user gestures over the tab's lifetime.
    #[must_use]
    pub fn user_gesture_count(&self) -> u64 {
        self.gestures.lock().total
    }

    /// Forwards renderer data to the active save, if any.
    fn forward_to_save(&self, method: &str, deliver: impl FnOnce(&dyn SaveOperation)) {
        match self.active_save() {
            Some(operation) => {
                trace!(tab_id = %self.tab_id, save_id = %operation.id(), method, "Forwarding to save");
                deliver(operation.as_ref());
            }
            None => {
                debug!(tab_id = %self.tab_id, method, "No active save, message dropped");
            }
        }
    }
}

// ============================================================================
// TabObserver
// ============================================================================

impl TabObserver for TabDownloadCoordinator {
    fn on_message_received(&self, message: &RendererMessage) -> bool {
        match message.parse() {
            ParsedMessage::SavableResourceLinks(links) => {
                self.forward_to_save(&message.method, |op| op.on_savable_resource_links(&links));
                true
            }
            ParsedMessage::SerializedHtmlData(data) => {
                self.forward_to_save(&message.method, |op| op.on_serialized_html_data(&data));
                true
            }
            ParsedMessage::Malformed { method, error } => {
                warn!(tab_id = %self.tab_id, %method, %error, "Malformed save message");
                true
            }
            ParsedMessage::NavigationCommitted { .. } | ParsedMessage::Unknown { .. } => false,
        }
    }

    fn did_get_user_gesture(&self) {
        {
            let mut gestures = self.gestures.lock();
            gestures.since_navigation = true;
            gestures.total += 1;
        }

        if let Some(delegate) = self.delegate() {
            delegate.on_user_gesture(self.tab_id);
        }
    }

    fn did_navigate_main_frame(&self, url: &str) {
        trace!(tab_id = %self.tab_id, %url, "Main frame navigated, gesture reset");
        self.gestures.lock().since_navigation = false;
    }
}

// ============================================================================
// Tests
// ============================================================================
