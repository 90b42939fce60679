//! Download permission and download-start relay.
//!
//! A permission query is a request/response exchange with the delegate.
//! The caller's fetch awaits the answer; no temporary file exists until it
//! resolves. Queries for a request that already has one outstanding wait
//! for that same decision instead of asking the delegate again.

// ============================================================================
// Imports
// ============================================================================

use std::collections::hash_map::Entry;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tokio::sync::oneshot;
use tracing::{debug, trace};

use crate::download::{DownloadItem, PermissionQuery};
use crate::identifiers::RequestId;

use super::TabDownloadCoordinator;

// ============================================================================
// Constants
// ============================================================================

/// Answer when no delegate is set, or a shared decision was abandoned.
pub const DEFAULT_DOWNLOAD_PERMISSION: bool = false;

// ============================================================================
// Types
// ============================================================================

/// Waiters attached to each outstanding decision.
pub(crate) type PermissionWaiters = FxHashMap<RequestId, Vec<oneshot::Sender<bool>>>;

// ============================================================================
// TabDownloadCoordinator - Permission
// ============================================================================

impl TabDownloadCoordinator {
    /// Decides whether the fetch `request_id` may become a download.
    ///
    /// Returns exactly the delegate's decision. Without a delegate the
    /// answer is [`DEFAULT_DOWNLOAD_PERMISSION`] (deny).
    pub async fn can_download(&self, request_id: RequestId) -> bool {
        if let Some(waiter) = self.join_outstanding(request_id) {
            trace!(tab_id = %self.tab_id, %request_id, "Waiting on outstanding permission decision");
            return waiter.await.unwrap_or(DEFAULT_DOWNLOAD_PERMISSION);
        }

        let outstanding = Outstanding {
            waiters: &self.pending_permissions,
            request_id,
            resolved: false,
        };

        let allowed = match self.delegate() {
            Some(delegate) => delegate.can_download(self.permission_query(request_id)).await,
            None => {
                debug!(tab_id = %self.tab_id, %request_id, "No delegate, denying download");
                DEFAULT_DOWNLOAD_PERMISSION
            }
        };

        outstanding.resolve(allowed);
        debug!(tab_id = %self.tab_id, %request_id, allowed, "Download permission decided");
        allowed
    }

    /// Tells the delegate a download started. No-op without a delegate.
    pub fn on_start_download(&self, download: &DownloadItem) {
        match self.delegate() {
            Some(delegate) => {
                debug!(tab_id = %self.tab_id, download_id = %download.id, "Download started");
                delegate.on_start_download(download, self.tab_id);
            }
            None => {
                trace!(tab_id = %self.tab_id, download_id = %download.id, "Download started, no delegate");
            }
        }
    }

    /// Number of requests with a decision outstanding.
    #[must_use]
    pub fn pending_permission_count(&self) -> usize {
        self.pending_permissions.lock().len()
    }

    /// Builds the query sent to the delegate.
    fn permission_query(&self, request_id: RequestId) -> PermissionQuery {
        PermissionQuery {
            request_id,
            tab_id: self.tab_id,
            has_user_gesture: self.has_user_gesture(),
        }
    }

    /// Registers as waiter if `request_id` already has a decision pending,
    /// otherwise marks it pending and returns `None`.
    fn join_outstanding(&self, request_id: RequestId) -> Option<oneshot::Receiver<bool>> {
        match self.pending_permissions.lock().entry(request_id) {
            Entry::Occupied(mut entry) => {
                let (tx, rx) = oneshot::channel();
                entry.get_mut().push(tx);
                Some(rx)
            }
            Entry::Vacant(entry) => {
                entry.insert(Vec::new());
                None
            }
        }
    }
}

// ============================================================================
// Outstanding
// ============================================================================

/// Clears a pending decision when the asking future ends.
///
/// If the future is dropped before the delegate answers, waiters see their
/// sender dropped and fall back to the default.
struct Outstanding<'a> {
    waiters: &'a Mutex<PermissionWaiters>,
    request_id: RequestId,
    resolved: bool,
}

impl Outstanding<'_> {
    /// Removes the entry and hands `allowed` to every waiter.
    fn resolve(mut self, allowed: bool) {
        self.resolved = true;
        let waiters = self.waiters.lock().remove(&self.request_id);
        for tx in waiters.into_iter().flatten() {
            let _ = tx.send(allowed);
        }
    }
}

impl Drop for Outstanding<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            self.waiters.lock().remove(&self.request_id);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
