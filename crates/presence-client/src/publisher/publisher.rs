//! Own-state publisher
//!
//! Turns the local participant's state into a single-update frame and hands
//! it to the transport. Delivery failures are logged and dropped.

use crate::protocol::PresenceMessage;
use crate::transport::PresenceTransport;
use presence_core::PresenceState;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Publishes own-state single updates
pub struct Publisher {
    /// Outbound transport
    transport: Arc<dyn PresenceTransport>,
    /// Frames accepted by the transport
    published: AtomicU64,
    /// Frames the transport refused
    dropped: AtomicU64,
}

impl Publisher {
    /// Create a publisher over a transport
    pub fn new(transport: Arc<dyn PresenceTransport>) -> Self {
        Self {
            transport,
            published: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Publish the complete state as one single-update frame
    ///
    /// Returns whether the transport accepted the frame.
    pub fn publish(&self, state: &PresenceState) -> bool {
        let frame = match PresenceMessage::SingleUpdate(state.clone()).to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode presence update");
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            }
        };

        match self.transport.send(frame) {
            Ok(()) => {
                self.published.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(
                    participant_id = %state.participant_id,
                    status = %state.status,
                    availability = %state.availability,
                    "Published own state"
                );
                true
            }
            Err(e) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    participant_id = %state.participant_id,
                    error = %e,
                    "Own state not delivered"
                );
                false
            }
        }
    }

    /// Number of frames accepted by the transport
    pub fn published_count(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    /// Number of frames the transport refused
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("published", &self.published_count())
            .field("dropped", &self.dropped_count())
            .finish()
    }
}
