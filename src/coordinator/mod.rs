//! Per-tab download coordinator.
//!
//! [`TabDownloadCoordinator`] sits between one tab and the page-saving and
//! download subsystems.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Coordinator struct, construction, accessors |
//! | `save` | Page, resource, and explicit-destination saves |
//! | `permission` | Download permission and start notifications |
//! | `observer` | Renderer messages and user gestures |
//! | `slot` | The single active-save slot |
//! | `completion` | Completion handle for the save service |
//!
//! # State Machine
//!
//! ```text
//!          save started              completion / failure
//!   Idle ───────────────▶ Saving ───────────────────────▶ Idle
//!                          │  ▲
//!                          └──┘ further save requests rejected
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod completion;
mod core;
mod observer;
mod permission;
mod save;
mod slot;

// ============================================================================
// Re-exports
// ============================================================================

pub use completion::SaveCompletion;
pub use self::core::TabDownloadCoordinator;
pub use permission::DEFAULT_DOWNLOAD_PERMISSION;
pub use slot::SaveState;
