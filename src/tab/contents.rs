//! The tab container as seen by its coordinator.

use std::sync::Arc;

use url::Url;

use crate::download::DownloadManager;
use crate::identifiers::TabId;

// ============================================================================
// TabContents
// ============================================================================

/// One browser tab: its identity, current document, and download manager.
///
/// The tab owns its coordinator. The coordinator holds only a weak
/// reference back, so every call may find the tab already gone.
pub trait TabContents: Send + Sync {
    /// Tab ID.
    fn tab_id(&self) -> TabId;

    /// Title of the current document. May be empty.
    fn title(&self) -> String;

    /// URL of the current document, if any.
    fn url(&self) -> Option<Url>;

    /// MIME type of the current document.
    fn contents_mime_type(&self) -> String;

    /// Stops any in-progress load so the saved document is stable.
    fn stop(&self);

    /// Download manager of the tab's profile.
    fn download_manager(&self) -> Option<Arc<dyn DownloadManager>>;
}
