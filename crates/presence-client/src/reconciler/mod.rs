//! Inbound message reconciliation
//!
//! Applies single updates and snapshots to the store in arrival order. The
//! last message applied wins; there is no sequence or timestamp comparison.

use crate::protocol::{Frame, FrameError, PresenceMessage};
use crate::store::PresenceStore;
use std::sync::Arc;

/// Applies inbound presence messages to the store
#[derive(Debug, Clone)]
pub struct Reconciler {
    store: Arc<PresenceStore>,
}

impl Reconciler {
    /// Create a reconciler writing into `store`
    pub fn new(store: Arc<PresenceStore>) -> Self {
        Self { store }
    }

    /// Apply a typed message
    pub fn apply(&self, message: PresenceMessage) {
        match message {
            PresenceMessage::SingleUpdate(state) => self.store.apply_update(state),
            PresenceMessage::Snapshot(snapshot) => self.store.apply_snapshot(snapshot),
        }
    }

    /// Shape-check a raw frame and apply it
    ///
    /// A malformed frame leaves the store untouched; the caller decides
    /// whether to log or drop it.
    pub fn apply_frame(&self, frame: &Frame) -> Result<(), FrameError> {
        let message = PresenceMessage::from_frame(frame).map_err(|e| {
            tracing::warn!(channel = %frame.channel, error = %e, "Rejected inbound frame");
            e
        })?;

        self.apply(message);
        Ok(())
    }
}
