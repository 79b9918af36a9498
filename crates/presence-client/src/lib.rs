//! # presence-client
//!
//! Keeps the local participant's presence in sync with every other
//! participant in a session. Own-state changes are published as frames on
//! an outbound transport; inbound frames are reconciled into a store that
//! renderers read from any thread.

pub mod client;
pub mod persistence;
pub mod presentation;
pub mod protocol;
pub mod publisher;
pub mod reconciler;
pub mod session;
pub mod store;
pub mod transport;

pub use client::{PresenceClient, PresenceClientBuilder};
pub use presentation::{AvailabilityOverlay, Presentation, StatusIcon};
pub use protocol::{Frame, FrameError, PresenceChannel, PresenceMessage, PresenceSnapshot};
pub use session::{JoinNotice, SessionState};
pub use store::{OwnStateChange, PresenceStore};
pub use transport::{ChannelTransport, NullTransport, PresenceTransport, TransportError};
