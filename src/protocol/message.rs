//! Renderer message types.
//!
//! Messages are notifications sent from the tab's rendering process to the
//! browser side. The coordinator decodes each one into a [`ParsedMessage`]
//! and acts only on the save-related variants.
//!
//! # Message Types
//!
//! | Method | Variant | Consumed by coordinator |
//! |--------|---------|-------------------------|
//! | `save.savableResourceLinks` | [`ParsedMessage::SavableResourceLinks`] | yes |
//! | `save.serializedHtmlData` | [`ParsedMessage::SerializedHtmlData`] | yes |
//! | `browsingContext.navigationCommitted` | [`ParsedMessage::NavigationCommitted`] | no (observed) |
//! | anything else | [`ParsedMessage::Unknown`] | no |

// ============================================================================
// Imports
// ============================================================================

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Constants
// ============================================================================

/// Method carrying the resource list of the current page.
pub const SAVABLE_RESOURCE_LINKS: &str = "save.savableResourceLinks";

/// Method carrying a chunk of serialized frame HTML.
pub const SERIALIZED_HTML_DATA: &str = "save.serializedHtmlData";

/// Method announcing a committed navigation.
pub const NAVIGATION_COMMITTED: &str = "browsingContext.navigationCommitted";

// ============================================================================
// RendererMessage
// ============================================================================

/// A message from the rendering process.
///
/// # Format
///
/// ```json
/// {
///   "method": "module.messageName",
///   "params": { ... }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererMessage {
    /// Message name in `module.messageName` format.
    pub method: String,

    /// Message-specific data.
    #[serde(default)]
    pub params: Value,
}

impl RendererMessage {
    /// Creates a message.
    #[inline]
    #[must_use]
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Returns the module name from the method.
    #[inline]
    #[must_use]
    pub fn module(&self) -> &str {
        self.method.split('.').next().unwrap_or_default()
    }

    /// Returns `true` if the message belongs to the `save` module.
    #[inline]
    #[must_use]
    pub fn is_save_message(&self) -> bool {
        self.module() == "save"
    }

    /// Parses the message into a typed variant.
    #[must_use]
    pub fn parse(&self) -> ParsedMessage {
        match self.method.as_str() {
            SAVABLE_RESOURCE_LINKS => self
                .decode_params()
                .map(ParsedMessage::SavableResourceLinks)
                .unwrap_or_else(|error| self.malformed(error)),

            SERIALIZED_HTML_DATA => self
                .decode_params()
                .map(ParsedMessage::SerializedHtmlData)
                .unwrap_or_else(|error| self.malformed(error)),

            NAVIGATION_COMMITTED => ParsedMessage::NavigationCommitted {
                url: self.get_string("url"),
                is_main_frame: self.get_bool_or("isMainFrame", true),
            },

            _ => ParsedMessage::Unknown {
                method: self.method.clone(),
                params: self.params.clone(),
            },
        }
    }

    /// Deserializes params into `T`.
    fn decode_params<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.params)
    }

    /// Builds the malformed variant for this message.
    fn malformed(&self, error: serde_json::Error) -> ParsedMessage {
        ParsedMessage::Malformed {
            method: self.method.clone(),
            error: error.to_string(),
        }
    }

    /// Gets a string from params.
    #[inline]
    fn get_string(&self, key: &str) -> String {
        self.params
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Gets a bool from params with default.
    #[inline]
    fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.params
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Every resource a complete-page save must fetch, as listed by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavableResourceLinks {
    /// Sub-resource URLs (images, stylesheets, scripts).
    pub resources: Vec<String>,
    /// Referrer for each entry of `resources`, same order.
    #[serde(default)]
    pub referrers: Vec<String>,
    /// URLs of the page's frames, main frame first.
    #[serde(default)]
    pub frames: Vec<String>,
}

/// Progress of the renderer's HTML serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SerializationStatus {
    /// More data for this frame follows.
    CurrentFrameNotFinished,
    /// This frame is done; others may follow.
    CurrentFrameFinished,
    /// The last chunk of the last frame.
    AllFramesFinished,
}

/// One chunk of serialized HTML for a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedHtmlData {
    /// Frame the chunk belongs to.
    pub frame_url: String,
    /// Serialized HTML text.
    #[serde(default)]
    pub data: String,
    /// Where the serializer stands after this chunk.
    pub status: SerializationStatus,
}

// ============================================================================
// ParsedMessage
// ============================================================================

/// Parsed renderer messages for type-safe handling.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedMessage {
    /// Resource list for a complete-page save.
    SavableResourceLinks(SavableResourceLinks),

    /// Serialized HTML chunk.
    SerializedHtmlData(SerializedHtmlData),

    /// A navigation committed in the tab.
    NavigationCommitted {
        /// New document URL.
        url: String,
        /// `false` for sub-frame navigations.
        is_main_frame: bool,
    },

    /// Known method whose params did not decode.
    Malformed {
        /// Message method.
        method: String,
        /// Decoder error.
        error: String,
    },

    /// Unknown message type.
    Unknown {
        /// Message method.
        method: String,
        /// Message params.
        params: Value,
    },
}

// ============================================================================
// Tests
// ============================================================================
