//! Tab-side contracts.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TabContents`] | The tab container a coordinator is attached to |
//! | [`TabObserver`] | Message and user-gesture hooks |
//! | [`ObserverList`] | A tab's registered observers |

// ============================================================================
// Submodules
// ============================================================================

mod contents;
mod observer;

// ============================================================================
// Re-exports
// ============================================================================

pub use contents::TabContents;
pub use observer::{ObserverList, TabObserver};
