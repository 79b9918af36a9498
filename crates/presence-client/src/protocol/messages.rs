//! Presence message format
//!
//! `Frame` is the raw transport unit; `PresenceMessage` is its typed form.

use super::payloads::find_mismatched_key;
use super::{PresenceChannel, PresenceSnapshot};
use presence_core::{ParticipantId, PresenceState};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw frame as exchanged with the transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Addressed channel name
    pub channel: String,

    /// Channel payload
    pub d: Value,
}

impl Frame {
    /// Create a frame on a known channel
    #[must_use]
    pub fn new(channel: PresenceChannel, d: Value) -> Self {
        Self {
            channel: channel.as_str().to_string(),
            d,
        }
    }

    /// Resolve the channel, `None` if the name is not a presence channel
    #[must_use]
    pub fn known_channel(&self) -> Option<PresenceChannel> {
        PresenceChannel::from_name(&self.channel)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frame(channel={})", self.channel)
    }
}

/// Typed presence message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenceMessage {
    /// One participant's complete state
    SingleUpdate(PresenceState),
    /// Complete remote population
    Snapshot(PresenceSnapshot),
}

impl PresenceMessage {
    /// Channel this message travels on
    #[must_use]
    pub fn channel(&self) -> PresenceChannel {
        match self {
            Self::SingleUpdate(_) => PresenceChannel::State,
            Self::Snapshot(_) => PresenceChannel::States,
        }
    }

    /// Encode as a transport frame
    pub fn to_frame(&self) -> Result<Frame, serde_json::Error> {
        let d = match self {
            Self::SingleUpdate(state) => serde_json::to_value(state)?,
            Self::Snapshot(snapshot) => serde_json::to_value(snapshot)?,
        };
        Ok(Frame::new(self.channel(), d))
    }

    /// Decode a transport frame, checking only its shape
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        let channel = frame
            .known_channel()
            .ok_or_else(|| FrameError::UnknownChannel(frame.channel.clone()))?;

        match channel {
            PresenceChannel::State => {
                let state: PresenceState = serde_json::from_value(frame.d.clone())
                    .map_err(|e| FrameError::InvalidPayload { channel, source: e })?;
                Ok(Self::SingleUpdate(state))
            }
            PresenceChannel::States => {
                let snapshot: PresenceSnapshot = serde_json::from_value(frame.d.clone())
                    .map_err(|e| FrameError::InvalidPayload { channel, source: e })?;
                if let Some(key) = find_mismatched_key(&snapshot) {
                    return Err(FrameError::MismatchedKey(key));
                }
                Ok(Self::Snapshot(snapshot))
            }
        }
    }
}

impl TryFrom<&Frame> for PresenceMessage {
    type Error = FrameError;

    fn try_from(frame: &Frame) -> Result<Self, Self::Error> {
        Self::from_frame(frame)
    }
}

/// Shape errors for inbound frames
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Frame addressed to a channel this client does not handle
    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    /// Payload does not match the channel's message shape
    #[error("Invalid {channel} payload: {source}")]
    InvalidPayload {
        channel: PresenceChannel,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot entry stored under another participant's id
    #[error("Snapshot entry key does not match its participant id: {0}")]
    MismatchedKey(ParticipantId),
}
