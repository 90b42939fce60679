//! Save preferences: default directory, remembered save type, prompting.
//!
//! Preferences are plain serde data so the embedding application can keep
//! them in its own settings store. JSON helpers are provided for the common
//! case of a standalone file.
//!
//! # Example
//!
//! ```
//! use tab_downloads::{SavePageType, SavePrefs};
//!
//! let prefs = SavePrefs::new()
//!     .with_default_directory("/tmp/saved")
//!     .with_save_type(SavePageType::HtmlOnly)
//!     .without_prompt();
//!
//! assert!(prefs.validate().is_ok());
//! assert!(!prefs.prompt_for_location);
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::save::SavePageType;

// ============================================================================
// SavePrefs
// ============================================================================

/// Preferences consulted when no explicit destination is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SavePrefs {
    /// Directory new saves land in.
    pub default_directory: PathBuf,

    /// Save type used for full-page saves. Updated when the user picks a
    /// different type at the prompt.
    pub save_type: SavePageType,

    /// Ask the delegate to confirm or change the suggested destination.
    pub prompt_for_location: bool,
}

impl Default for SavePrefs {
    fn default() -> Self {
        Self {
            default_directory: default_download_directory(),
            save_type: SavePageType::default(),
            prompt_for_location: true,
        }
    }
}

/// Platform download directory, or the temp directory when there is none.
fn default_download_directory() -> PathBuf {
    dirs::download_dir().unwrap_or_else(std::env::temp_dir)
}

// ============================================================================
// Constructors
// ============================================================================

impl SavePrefs {
    /// Creates preferences with platform defaults.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses preferences from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] on malformed input and [`Error::Config`] if
    /// the parsed preferences fail [`validate`](Self::validate).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let prefs: Self = serde_json::from_str(json)?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Loads preferences from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`from_json_str`](Self::from_json_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading save preferences");
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl SavePrefs {
    /// Sets the default save directory.
    #[inline]
    #[must_use]
    pub fn with_default_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.default_directory = dir.into();
        self
    }

    /// Sets the save type for full-page saves.
    #[inline]
    #[must_use]
    pub fn with_save_type(mut self, save_type: SavePageType) -> Self {
        self.save_type = save_type;
        self
    }

    /// Saves straight to the suggested destination without prompting.
    #[inline]
    #[must_use]
    pub fn without_prompt(mut self) -> Self {
        self.prompt_for_location = false;
        self
    }
}

// ============================================================================
// Persistence & Validation
// ============================================================================

impl SavePrefs {
    /// Writes preferences as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] or [`Error::Io`].
    pub fn store(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        debug!(path = %path.display(), "Stored save preferences");
        Ok(())
    }

    /// Validates the preferences.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the default directory is empty.
    pub fn validate(&self) -> Result<()> {
        if self.default_directory.as_os_str().is_empty() {
            return Err(Error::config("Default save directory must not be empty"));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
