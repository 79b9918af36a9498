//! Outbound transport seam

mod channel;

pub use channel::{ChannelTransport, NullTransport, PresenceTransport, TransportError};
