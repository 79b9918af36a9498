//! Outbound transports
//!
//! The host drains the receiving end of a [`ChannelTransport`] onto its real
//! connection to the authoritative peer.

use crate::protocol::Frame;
use tokio::sync::mpsc;

/// Sink for outbound presence frames
///
/// Implementations must not block; delivery is best-effort.
pub trait PresenceTransport: Send + Sync {
    /// Hand a frame over for delivery
    fn send(&self, frame: Frame) -> Result<(), TransportError>;
}

/// Bounded channel transport
#[derive(Debug, Clone)]
pub struct ChannelTransport {
    sender: mpsc::Sender<Frame>,
}

impl ChannelTransport {
    /// Create a transport and the receiver the host drains
    #[must_use]
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<Frame>) {
        let (sender, receiver) = mpsc::channel(buffer);
        (Self { sender }, receiver)
    }

    /// Check if the receiving side has been dropped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl PresenceTransport for ChannelTransport {
    fn send(&self, frame: Frame) -> Result<(), TransportError> {
        self.sender.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => TransportError::Full,
            mpsc::error::TrySendError::Closed(_) => TransportError::Closed,
        })
    }
}

/// Transport that discards every frame
///
/// Used until a host wires a real transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTransport;

impl PresenceTransport for NullTransport {
    fn send(&self, frame: Frame) -> Result<(), TransportError> {
        tracing::trace!(frame = %frame, "Discarding frame, no transport attached");
        Ok(())
    }
}

/// Transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Outbound buffer is full")]
    Full,

    #[error("Transport is closed")]
    Closed,
}
