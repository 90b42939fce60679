//! Renderer message types.
//!
//! This module defines the messages the tab's rendering process sends to
//! the browser side, and their decoding into a closed set of variants.
//!
//! # Message Naming
//!
//! Messages follow `module.messageName` format:
//!
//! - `save.savableResourceLinks`
//! - `save.serializedHtmlData`
//! - `browsingContext.navigationCommitted`

// ============================================================================
// Submodules
// ============================================================================

/// Message and payload types.
pub mod message;

// ============================================================================
// Re-exports
// ============================================================================

pub use message::{
    ParsedMessage, RendererMessage, SavableResourceLinks, SerializationStatus, SerializedHtmlData,
};
