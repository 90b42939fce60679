//! Download records.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::identifiers::{DownloadId, TabId};

// ============================================================================
// DownloadItem
// ============================================================================

/// A download created by the download manager.
///
/// The coordinator never creates or mutates these; it only forwards them to
/// the delegate when a download starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadItem {
    /// Download ID.
    pub id: DownloadId,
    /// Fetched URL.
    pub url: Url,
    /// Page that referred the fetch.
    pub referrer: Option<Url>,
    /// Final file path on disk.
    pub target_path: PathBuf,
    /// MIME type reported by the server.
    pub mime_type: Option<String>,
    /// Tab the download originated from.
    pub tab_id: Option<TabId>,
}

impl DownloadItem {
    /// Creates a download record with a fresh ID.
    #[must_use]
    pub fn new(url: Url, target_path: impl Into<PathBuf>) -> Self {
        Self {
            id: DownloadId::next(),
            url,
            referrer: None,
            target_path: target_path.into(),
            mime_type: None,
            tab_id: None,
        }
    }

    /// Sets the referrer.
    #[inline]
    #[must_use]
    pub fn with_referrer(mut self, referrer: Url) -> Self {
        self.referrer = Some(referrer);
        self
    }

    /// Sets the MIME type.
    #[inline]
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Sets the originating tab.
    #[inline]
    #[must_use]
    pub fn with_tab(mut self, tab_id: TabId) -> Self {
        self.tab_id = Some(tab_id);
        self
    }

    /// Returns the file name component of the target path.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.target_path.file_name().and_then(|name| name.to_str())
    }

    /// Returns the target path.
    #[inline]
    #[must_use]
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }
}

// ============================================================================
// Tests
// ============================================================================
