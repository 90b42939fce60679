//! Save request and result types.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::identifiers::{SaveId, TabId};

// ============================================================================
// SavePageType
// ============================================================================

/// What a page save writes to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SavePageType {
    /// Only the main document.
    HtmlOnly,

    /// The main document plus its sub-resources in a side directory.
    #[default]
    Complete,
}

impl SavePageType {
    /// Returns `true` if sub-resources are written next to the main file.
    #[inline]
    #[must_use]
    pub const fn includes_resources(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl fmt::Display for SavePageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlOnly => f.write_str("html-only"),
            Self::Complete => f.write_str("complete"),
        }
    }
}

// ============================================================================
// SaveScope
// ============================================================================

/// What is being saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveScope {
    /// The tab's current top-level document.
    Page,

    /// A single resource, possibly a sub-frame of the page.
    Resource(Url),
}

// ============================================================================
// SaveDestination
// ============================================================================

/// Where a save writes: the main file and the directory for sub-resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveDestination {
    /// Path of the main file.
    pub main_file: PathBuf,
    /// Directory receiving sub-resources of a complete-page save.
    pub resource_dir: PathBuf,
}

impl SaveDestination {
    /// Creates a destination from explicit paths.
    #[inline]
    #[must_use]
    pub fn new(main_file: impl Into<PathBuf>, resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            main_file: main_file.into(),
            resource_dir: resource_dir.into(),
        }
    }

    /// Returns the main file path.
    #[inline]
    #[must_use]
    pub fn main_file(&self) -> &Path {
        &self.main_file
    }

    /// Returns the resource directory path.
    #[inline]
    #[must_use]
    pub fn resource_dir(&self) -> &Path {
        &self.resource_dir
    }
}

// ============================================================================
// SaveChoice
// ============================================================================

/// A destination together with the save type, as offered at a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveChoice {
    /// Output paths.
    pub destination: SaveDestination,
    /// HTML only or complete page.
    pub save_type: SavePageType,
}

impl SaveChoice {
    /// Creates a choice.
    #[inline]
    #[must_use]
    pub fn new(destination: SaveDestination, save_type: SavePageType) -> Self {
        Self {
            destination,
            save_type,
        }
    }
}

// ============================================================================
// SaveOrigin
// ============================================================================

/// How the destination of a save was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveOrigin {
    /// Derived from preferences and the tab title without asking.
    DefaultPrefs,
    /// Confirmed or changed by the delegate's prompt.
    Prompted,
    /// Supplied verbatim by the caller; never sanitized.
    Explicit,
}

// ============================================================================
// SaveRequest
// ============================================================================

/// Everything the save service needs to start one operation.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    /// Identifier the completion signal must carry back.
    pub id: SaveId,
    /// Tab whose document is saved.
    pub tab_id: TabId,
    /// URL of the tab's document at request time.
    pub page_url: Option<Url>,
    /// Whole page or single resource.
    pub scope: SaveScope,
    /// Output paths.
    pub destination: SaveDestination,
    /// HTML only or complete page.
    pub save_type: SavePageType,
    /// How the destination was decided.
    pub origin: SaveOrigin,
}

// ============================================================================
// SaveOutcome
// ============================================================================

/// Terminal result of a save operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// All files written.
    Completed,
    /// The save stopped with an error.
    Failed {
        /// Reason reported by the save service.
        reason: String,
    },
    /// The save was abandoned before finishing.
    Cancelled,
}

impl SaveOutcome {
    /// Returns `true` for [`SaveOutcome::Completed`].
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

// ============================================================================
// Tests
// ============================================================================
