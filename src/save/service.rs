//! Contracts of the external save engine.

use std::sync::Arc;

use crate::coordinator::SaveCompletion;
use crate::error::Result;
use crate::identifiers::SaveId;
use crate::protocol::{SavableResourceLinks, SerializedHtmlData};

use super::SaveRequest;

// ============================================================================
// SaveService
// ============================================================================

/// Starts save operations.
///
/// The service owns the actual serialization work. The coordinator only
/// starts operations and keeps a handle to the one in flight.
pub trait SaveService: Send + Sync {
    /// Starts saving according to `request`.
    ///
    /// The service must call [`SaveCompletion::finish`] exactly once when the
    /// operation ends; dropping the handle unfinished counts as cancelled.
    /// It may do so before returning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SaveRejected`](crate::Error::SaveRejected) or
    /// [`Error::Io`](crate::Error::Io) when the operation cannot start.
    fn start(
        &self,
        request: SaveRequest,
        completion: SaveCompletion,
    ) -> Result<Arc<dyn SaveOperation>>;
}

// ============================================================================
// SaveOperation
// ============================================================================

/// A running save, fed with data arriving from the tab's renderer.
pub trait SaveOperation: Send + Sync {
    /// Identifier from the [`SaveRequest`] that started this operation.
    fn id(&self) -> SaveId;

    /// The renderer listed the resources a complete-page save must fetch.
    fn on_savable_resource_links(&self, links: &SavableResourceLinks);

    /// The renderer produced a chunk of serialized HTML for a frame.
    fn on_serialized_html_data(&self, data: &SerializedHtmlData);
}
