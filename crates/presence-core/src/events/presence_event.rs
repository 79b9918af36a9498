//! Presence events - emitted when the local participant's own state changes
//!
//! These events are used for:
//! - Persisting the last chosen status and availability
//! - Letting a host refresh its own status indicator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Availability, ParticipantId};

/// All own-state change events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PresenceEvent {
    OwnStatusChanged(OwnStatusChangedEvent),
    OwnAvailabilityChanged(OwnAvailabilityChangedEvent),
}

impl PresenceEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::OwnStatusChanged(_) => "OWN_STATUS_CHANGED",
            Self::OwnAvailabilityChanged(_) => "OWN_AVAILABILITY_CHANGED",
        }
    }

    /// Get the participant whose state changed
    pub fn participant_id(&self) -> ParticipantId {
        match self {
            Self::OwnStatusChanged(e) => e.participant_id,
            Self::OwnAvailabilityChanged(e) => e.participant_id,
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::OwnStatusChanged(e) => e.timestamp,
            Self::OwnAvailabilityChanged(e) => e.timestamp,
        }
    }
}

// ============================================================================
// Event Structs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnStatusChangedEvent {
    pub participant_id: ParticipantId,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl OwnStatusChangedEvent {
    pub fn new(participant_id: ParticipantId, status: impl Into<String>) -> Self {
        Self {
            participant_id,
            status: status.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnAvailabilityChangedEvent {
    pub participant_id: ParticipantId,
    pub availability: Availability,
    pub timestamp: DateTime<Utc>,
}

impl OwnAvailabilityChangedEvent {
    pub fn new(participant_id: ParticipantId, availability: Availability) -> Self {
        Self {
            participant_id,
            availability,
            timestamp: Utc::now(),
        }
    }
}
