//! Download records and the collaborators that decide on and start downloads.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DownloadItem`] | Record of a started download |
//! | [`DownloadTabDelegate`] | Permission decisions and start notifications |
//! | [`DownloadManager`] | Plain URL downloads |
//! | [`PermissionQuery`] | What the delegate is asked |

// ============================================================================
// Submodules
// ============================================================================

mod delegate;
mod item;

// ============================================================================
// Re-exports
// ============================================================================

pub use delegate::{DownloadManager, DownloadTabDelegate, PermissionQuery};
pub use item::DownloadItem;
