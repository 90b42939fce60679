//! Tab Downloads - per-tab page saving and download permission coordinator.
//!
//! Every browser tab gets one [`TabDownloadCoordinator`]. It brokers
//! between the tab, a page-saving engine ([`SaveService`]) and an embedder
//! delegate ([`DownloadTabDelegate`]).
//!
//! # Architecture
//!
//! - **Tab side**: renderer messages and user gestures arrive through
//!   [`TabObserver`]; the coordinator consumes the save-related ones
//! - **Save side**: at most one [`SaveOperation`] per tab, finished through
//!   a [`SaveCompletion`] handle
//! - **Embedder side**: the delegate decides download permission
//!   asynchronously and is told when downloads start
//!
//! The coordinator holds only weak references to the tab and the delegate,
//! so it never keeps either alive.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tab_downloads::{
//!     DownloadManager, Error, Result, SaveCompletion, SaveOperation, SavePageType, SaveRequest,
//!     SaveService, TabContents, TabDownloadCoordinator, TabId,
//! };
//! use url::Url;
//!
//! struct Tab(TabId);
//!
//! impl TabContents for Tab {
//!     fn tab_id(&self) -> TabId { self.0 }
//!     fn title(&self) -> String { "Example".into() }
//!     fn url(&self) -> Option<Url> { Url::parse("https://example.com/").ok() }
//!     fn contents_mime_type(&self) -> String { "text/html".into() }
//!     fn stop(&self) {}
//!     fn download_manager(&self) -> Option<Arc<dyn DownloadManager>> { None }
//! }
//!
//! struct Engine;
//!
//! impl SaveService for Engine {
//!     fn start(&self, _: SaveRequest, _: SaveCompletion) -> Result<Arc<dyn SaveOperation>> {
//!         Err(Error::save_rejected("no engine"))
//!     }
//! }
//!
//! let tab: Arc<dyn TabContents> = Arc::new(Tab(TabId::new(1).expect("non-zero")));
//! let coordinator = TabDownloadCoordinator::new(&tab, Arc::new(Engine));
//!
//! let started = coordinator.save_page("/tmp/page.html", "/tmp/page_files", SavePageType::Complete);
//! println!("save started: {started}");
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`coordinator`] | [`TabDownloadCoordinator`] and its save slot |
//! | [`download`] | Delegate and download manager contracts |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`prefs`] | Save preferences |
//! | [`protocol`] | Renderer message types |
//! | [`save`] | Save service contracts and file naming |
//! | [`tab`] | Tab contents and observer contracts |

// ============================================================================
// Modules
// ============================================================================

/// Per-tab coordinator.
///
/// Owns the single active-save slot and answers permission queries.
pub mod coordinator;

/// Download delegate, download manager and download items.
pub mod download;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for tabs, requests, downloads and saves.
pub mod identifiers;

/// Save preferences.
pub mod prefs;

/// Renderer message types.
pub mod protocol;

/// Page-saving contracts and destination naming.
pub mod save;

/// Tab contents and observer hooks.
pub mod tab;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

// Coordinator types
pub use coordinator::{
    DEFAULT_DOWNLOAD_PERMISSION, SaveCompletion, SaveState, TabDownloadCoordinator,
};

// Download types
pub use download::{DownloadItem, DownloadManager, DownloadTabDelegate, PermissionQuery};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{DownloadId, RequestId, SaveId, TabId};

// Preferences
pub use prefs::SavePrefs;

// Protocol types
pub use protocol::{
    ParsedMessage, RendererMessage, SavableResourceLinks, SerializationStatus, SerializedHtmlData,
};

// Save types
pub use save::{
    SaveChoice, SaveDestination, SaveOperation, SaveOrigin, SaveOutcome, SavePageType,
    SaveRequest, SaveScope, SaveService,
};

// Tab types
pub use tab::{ObserverList, TabContents, TabObserver};
