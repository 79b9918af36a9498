//! Presence protocol definitions
//!
//! Defines the addressed channels, the raw frame format, and the two message
//! shapes exchanged with the authoritative peer.

mod channels;
mod messages;
mod payloads;

pub use channels::PresenceChannel;
pub use messages::{Frame, FrameError, PresenceMessage};
pub use payloads::{find_mismatched_key, snapshot_from_states, PresenceSnapshot};
