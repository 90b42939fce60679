//! Page-saving contracts and destination naming.
//!
//! The save engine itself lives outside this crate. This module defines
//! what the coordinator hands it and what it hands back.
//!
//! | Module | Description |
//! |--------|-------------|
//! | `types` | Save type, scope, destination, request, outcome |
//! | `service` | [`SaveService`] and [`SaveOperation`] traits |
//! | `naming` | Suggested file names and savable MIME types |

// ============================================================================
// Submodules
// ============================================================================

/// Suggested destinations for prompted and default-prefs saves.
pub mod naming;

mod service;
mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use service::{SaveOperation, SaveService};
pub use types::{
    SaveChoice, SaveDestination, SaveOrigin, SaveOutcome, SavePageType, SaveRequest,
    SaveScope,
};
