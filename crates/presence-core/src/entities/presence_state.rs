//! Presence state entity - one participant's published presence

use serde::{Deserialize, Serialize};

use crate::value_objects::{Availability, ParticipantId};

/// Status tag meaning "no status chosen"
pub const UNSET_STATUS: &str = "";

/// A participant's published presence
///
/// Both fields are always present; "unset" is expressed with
/// [`UNSET_STATUS`] and [`Availability::Unset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceState {
    pub participant_id: ParticipantId,
    pub status: String,
    pub availability: Availability,
}

impl PresenceState {
    /// Create a presence state with explicit values
    pub fn new(
        participant_id: ParticipantId,
        status: impl Into<String>,
        availability: Availability,
    ) -> Self {
        Self {
            participant_id,
            status: status.into(),
            availability,
        }
    }

    /// Create a presence state with unset status and availability
    pub fn unset(participant_id: ParticipantId) -> Self {
        Self::new(participant_id, UNSET_STATUS, Availability::Unset)
    }

    /// Restore a participant's state from saved values
    pub fn from_saved(participant_id: ParticipantId, saved: &SavedPresence) -> Self {
        Self::new(participant_id, saved.status.clone(), saved.availability)
    }

    /// Check if a status tag has been chosen
    #[inline]
    pub fn has_status(&self) -> bool {
        !self.status.is_empty()
    }

    /// Replace the status tag
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Replace the availability
    pub fn set_availability(&mut self, availability: Availability) {
        self.availability = availability;
    }

    /// Extract the durable part of this state
    pub fn to_saved(&self) -> SavedPresence {
        SavedPresence {
            status: self.status.clone(),
            availability: self.availability,
        }
    }
}

/// Durable record of the local participant's last chosen state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedPresence {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub availability: Availability,
}

impl SavedPresence {
    pub fn new(status: impl Into<String>, availability: Availability) -> Self {
        Self {
            status: status.into(),
            availability,
        }
    }
}
