//! Error types for tab downloads.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! Fallible operations return [`Result<T>`] which uses [`Error`]. The
//! coordinator's `bool`/unit entry points degrade these to "did not start".
//!
//! ```ignore
//! use tab_downloads::{Error, Result};
//!
//! fn example(coordinator: &TabDownloadCoordinator) -> Result<()> {
//!     let save_id = coordinator.try_save_page(main, dir, SavePageType::Complete)?;
//!     println!("started {save_id}");
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Save | [`Error::SaveInProgress`], [`Error::SaveRejected`], [`Error::SaveCancelled`], [`Error::NotSavable`] |
//! | Tab | [`Error::TabClosed`] |
//! | External | [`Error::Io`], [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::{SaveId, TabId};

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when save preferences are invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Save Errors
    // ========================================================================
    /// A save operation is already running for this tab.
    #[error("Save already in progress: {active}")]
    SaveInProgress {
        /// The save operation occupying the slot.
        active: SaveId,
    },

    /// The save service refused to start the operation.
    ///
    /// Returned for invalid paths or I/O failures at start.
    #[error("Save rejected: {message}")]
    SaveRejected {
        /// Reason given by the save service.
        message: String,
    },

    /// The user dismissed the save prompt.
    #[error("Save cancelled")]
    SaveCancelled,

    /// The tab's contents cannot be serialized by the save service.
    #[error("Contents not savable: {mime_type}")]
    NotSavable {
        /// MIME type of the tab's contents.
        mime_type: String,
    },

    // ========================================================================
    // Tab Errors
    // ========================================================================
    /// The owning tab has already been destroyed.
    #[error("Tab closed: {tab_id}")]
    TabClosed {
        /// The tab this coordinator was attached to.
        tab_id: TabId,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a save-in-progress error.
    #[inline]
    pub fn save_in_progress(active: SaveId) -> Self {
        Self::SaveInProgress { active }
    }

    /// Creates a save rejected error.
    #[inline]
    pub fn save_rejected(message: impl Into<String>) -> Self {
        Self::SaveRejected {
            message: message.into(),
        }
    }

    /// Creates a not savable error.
    #[inline]
    pub fn not_savable(mime_type: impl Into<String>) -> Self {
        Self::NotSavable {
            mime_type: mime_type.into(),
        }
    }

    /// Creates a tab closed error.
    #[inline]
    pub fn tab_closed(tab_id: TabId) -> Self {
        Self::TabClosed { tab_id }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if the save was refused because another one is running.
    #[inline]
    #[must_use]
    pub fn is_save_in_progress(&self) -> bool {
        matches!(self, Self::SaveInProgress { .. })
    }

    /// Returns `true` if this error means no save operation was started.
    ///
    /// Every error in this crate degrades to "did not start"; this groups
    /// the ones raised on the save path.
    #[inline]
    #[must_use]
    pub fn is_save_error(&self) -> bool {
        matches!(
            self,
            Self::SaveInProgress { .. }
                | Self::SaveRejected { .. }
                | Self::SaveCancelled
                | Self::NotSavable { .. }
        )
    }

    /// Returns `true` if the error came from the user dismissing a prompt.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::SaveCancelled)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::save_rejected("directory missing");
        assert_eq!(err.to_string(), "Save rejected: directory missing");
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("empty default directory");
        assert_eq!(
            err.to_string(),
            "Configuration error: empty default directory"
        );
    }

    #[test]
    fn test_tab_closed_display() {
        let tab_id = TabId::new(7).expect("valid tab id");
        assert_eq!(Error::tab_closed(tab_id).to_string(), "Tab closed: 7");
    }

    #[test]
    fn test_is_save_error() {
        let busy = Error::save_in_progress(SaveId::generate());
        let cancelled = Error::SaveCancelled;
        let other = Error::tab_closed(TabId::new(3).expect("valid tab id"));

        assert!(busy.is_save_error());
        assert!(busy.is_save_in_progress());
        assert!(cancelled.is_save_error());
        assert!(cancelled.is_cancelled());
        assert!(!other.is_save_error());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
