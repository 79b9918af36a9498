//! Participant ID - stable identifier of a session participant
//!
//! Wraps the account UUID. Serialized as the hyphenated string form so it can
//! be used directly as a JSON object key in snapshot payloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque participant identifier (account UUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    /// Create a participant ID from a UUID
    #[inline]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a random participant ID
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID
    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Check if this is the nil UUID (never a real account)
    #[inline]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, ParticipantIdParseError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ParticipantIdParseError::InvalidFormat(s.to_string()))
    }
}

/// Error when parsing a participant ID from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParticipantIdParseError {
    #[error("invalid participant id: {0}")]
    InvalidFormat(String),
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for ParticipantId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<ParticipantId> for Uuid {
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}

impl std::str::FromStr for ParticipantId {
    type Err = ParticipantIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
