//! Delegate and download manager contracts.

use async_trait::async_trait;
use url::Url;

use crate::identifiers::{RequestId, TabId};
use crate::save::SaveChoice;

use super::DownloadItem;

// ============================================================================
// PermissionQuery
// ============================================================================

/// A pending fetch asking whether it may become a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PermissionQuery {
    /// The fetch request awaiting the decision.
    pub request_id: RequestId,
    /// Tab the fetch belongs to.
    pub tab_id: TabId,
    /// Whether the user interacted with the tab since its last main-frame
    /// navigation.
    pub has_user_gesture: bool,
}

// ============================================================================
// DownloadTabDelegate
// ============================================================================

/// Receives permission queries and notifications from a tab's coordinator.
///
/// Normally implemented by the window containing the tab. The coordinator
/// keeps only a weak reference; the delegate's owner controls its lifetime.
#[async_trait]
pub trait DownloadTabDelegate: Send + Sync {
    /// Decides whether the fetch may proceed as a download.
    ///
    /// Called before any temporary file exists. The fetch stays pending
    /// until this resolves.
    async fn can_download(&self, query: PermissionQuery) -> bool;

    /// A download started in the tab.
    fn on_start_download(&self, download: &DownloadItem, tab_id: TabId);

    /// The user interacted with the tab.
    fn on_user_gesture(&self, _tab_id: TabId) {}

    /// Lets the user confirm or change where a save goes and its type.
    ///
    /// Only consulted when the save preferences ask for a prompt. Returning
    /// `None` cancels the save. The default accepts `suggested`.
    ///
    /// Called synchronously on the tab's control thread, before the save
    /// slot is claimed, and must return without waiting on the user. A
    /// delegate showing a real dialog should return `None` here and start a
    /// fresh save through `save_page` once the user has answered.
    fn choose_save_destination(&self, suggested: SaveChoice, _tab_id: TabId) -> Option<SaveChoice> {
        Some(suggested)
    }
}

// ============================================================================
// DownloadManager
// ============================================================================

/// Starts plain downloads for contents the save service cannot serialize.
pub trait DownloadManager: Send + Sync {
    /// Downloads `url` on behalf of `tab_id`.
    fn download_url(&self, url: &Url, referrer: Option<&Url>, tab_id: TabId);
}
