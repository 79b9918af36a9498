//! Presence channels
//!
//! Each message kind travels on its own addressed channel.

use std::fmt;

/// Addressed channels carrying presence messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresenceChannel {
    /// One participant's state (client to peer and peer to client)
    State,
    /// Full remote population (peer to client only)
    States,
}

impl PresenceChannel {
    /// Channel name used on the wire
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::State => "presence:state",
            Self::States => "presence:states",
        }
    }

    /// Look up a channel by its wire name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "presence:state" => Some(Self::State),
            "presence:states" => Some(Self::States),
            _ => None,
        }
    }

    /// Check if a client may send on this channel
    #[must_use]
    pub const fn is_client_channel(self) -> bool {
        matches!(self, Self::State)
    }
}

impl fmt::Display for PresenceChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
