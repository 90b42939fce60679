//! Tab observers and the per-tab observer list.
//!
//! Observers are composed into a tab's [`ObserverList`] rather than
//! inherited. Each message is offered to observers in registration order
//! until one consumes it. Gestures and main-frame navigations are
//! broadcast to every observer and cannot be consumed.

// ============================================================================
// Imports
// ============================================================================

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::trace;

use crate::protocol::message::NAVIGATION_COMMITTED;
use crate::protocol::{ParsedMessage, RendererMessage};

// ============================================================================
// TabObserver
// ============================================================================

/// Capabilities an observer of tab lifecycle signals may implement.
pub trait TabObserver: Send + Sync {
    /// Offers a renderer message. Return `true` to consume it.
    fn on_message_received(&self, _message: &RendererMessage) -> bool {
        false
    }

    /// The user interacted with the tab.
    fn did_get_user_gesture(&self) {}

    /// A new top-level document committed at `url`.
    fn did_navigate_main_frame(&self, _url: &str) {}
}

// ============================================================================
// ObserverList
// ============================================================================

/// Observers attached to one tab.
///
/// Holds weak references; observers that have been dropped are skipped and
/// pruned on the next registration.
#[derive(Default)]
pub struct ObserverList {
    observers: RwLock<Vec<Weak<dyn TabObserver>>>,
}

impl ObserverList {
    /// Creates an empty list.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer.
    pub fn add(&self, observer: &Arc<dyn TabObserver>) {
        let mut observers = self.observers.write();
        observers.retain(|o| o.strong_count() > 0);
        observers.push(Arc::downgrade(observer));
    }

    /// Unregisters an observer. Returns `true` if it was registered.
    pub fn remove(&self, observer: &Arc<dyn TabObserver>) -> bool {
        let target = Arc::downgrade(observer);
        let mut observers = self.observers.write();
        let found = observers.iter().any(|o| Weak::ptr_eq(o, &target));
        observers.retain(|o| !Weak::ptr_eq(o, &target) && o.strong_count() > 0);
        found
    }

    /// Returns the number of live observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers
            .read()
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }

    /// Returns `true` if no live observer is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Offers `message` to each observer until one consumes it.
    ///
    /// A main-frame navigation commit is first broadcast through
    /// [`dispatch_main_frame_navigation`](Self::dispatch_main_frame_navigation),
    /// whoever ends up consuming the message. Returns `true` if some
    /// observer consumed the message.
    pub fn dispatch_message(&self, message: &RendererMessage) -> bool {
        if message.method == NAVIGATION_COMMITTED
            && let ParsedMessage::NavigationCommitted {
                url,
                is_main_frame: true,
            } = message.parse()
        {
            self.dispatch_main_frame_navigation(&url);
        }

        for observer in self.live() {
            if observer.on_message_received(message) {
                trace!(method = %message.method, "Message consumed");
                return true;
            }
        }
        false
    }

    /// Notifies every observer of a user gesture.
    pub fn dispatch_user_gesture(&self) {
        for observer in self.live() {
            observer.did_get_user_gesture();
        }
    }

    /// Notifies every observer that a new top-level document committed.
    pub fn dispatch_main_frame_navigation(&self, url: &str) {
        trace!(%url, "Main frame navigated");
        for observer in self.live() {
            observer.did_navigate_main_frame(url);
        }
    }

    /// Snapshot of live observers, taken so no lock is held during callbacks.
    fn live(&self) -> Vec<Arc<dyn TabObserver>> {
        self.observers.read().iter().filter_map(Weak::upgrade).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
