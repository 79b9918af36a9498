//! Presence store
//!
//! Holds the local participant's own state and the latest known state of
//! every other participant. Both are guarded by `parking_lot::RwLock`; they
//! are never written together, so each has its own lock.

use crate::protocol::PresenceSnapshot;
use parking_lot::RwLock;
use presence_core::{
    Availability, OwnAvailabilityChangedEvent, OwnStatusChangedEvent, ParticipantId,
    PresenceEvent, PresenceState,
};

/// Result of an own-state mutation: the new state plus its change event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnStateChange {
    pub state: PresenceState,
    pub event: PresenceEvent,
}

/// Local view of all participants' presence
pub struct PresenceStore {
    /// Own state slot, always populated
    own: RwLock<PresenceState>,

    /// Other participants by id
    remote: RwLock<PresenceSnapshot>,
}

impl PresenceStore {
    /// Create a store owned by the participant in `own`
    #[must_use]
    pub fn new(own: PresenceState) -> Self {
        Self {
            own: RwLock::new(own),
            remote: RwLock::new(PresenceSnapshot::new()),
        }
    }

    /// Get the local participant's id
    pub fn owner(&self) -> ParticipantId {
        self.own.read().participant_id
    }

    /// Get the local participant's current state
    pub fn own_state(&self) -> PresenceState {
        self.own.read().clone()
    }

    /// Read the own state under its lock
    ///
    /// Own-state writers wait until `f` returns, so anything `f` emits
    /// describes the current value. `f` must not write own state.
    pub fn with_own_state<R>(&self, f: impl FnOnce(&PresenceState) -> R) -> R {
        f(&self.own.read())
    }

    /// Replace the local status tag
    pub fn set_own_status(&self, status: impl Into<String>) -> OwnStateChange {
        self.set_own_status_and(status, |_| {})
    }

    /// Replace the local status tag, running `commit` before the slot unlocks
    ///
    /// Concurrent setters are serialized through `commit`, so publishes and
    /// change events leave in the same order as the writes. `commit` must
    /// not touch own state.
    pub fn set_own_status_and<F>(&self, status: impl Into<String>, commit: F) -> OwnStateChange
    where
        F: FnOnce(&OwnStateChange),
    {
        let status = status.into();
        let change = {
            let mut own = self.own.write();
            own.set_status(status.clone());
            let change = OwnStateChange {
                state: own.clone(),
                event: PresenceEvent::OwnStatusChanged(OwnStatusChangedEvent::new(
                    own.participant_id,
                    status,
                )),
            };
            commit(&change);
            change
        };

        tracing::debug!(
            participant_id = %change.state.participant_id,
            status = %change.state.status,
            "Own status changed"
        );

        change
    }

    /// Replace the local availability
    pub fn set_own_availability(&self, availability: Availability) -> OwnStateChange {
        self.set_own_availability_and(availability, |_| {})
    }

    /// Replace the local availability, running `commit` before the slot unlocks
    pub fn set_own_availability_and<F>(
        &self,
        availability: Availability,
        commit: F,
    ) -> OwnStateChange
    where
        F: FnOnce(&OwnStateChange),
    {
        let change = {
            let mut own = self.own.write();
            own.set_availability(availability);
            let change = OwnStateChange {
                state: own.clone(),
                event: PresenceEvent::OwnAvailabilityChanged(OwnAvailabilityChangedEvent::new(
                    own.participant_id,
                    availability,
                )),
            };
            commit(&change);
            change
        };

        tracing::debug!(
            participant_id = %change.state.participant_id,
            availability = %availability,
            "Own availability changed"
        );

        change
    }

    /// Get a remote participant's state, `None` if unknown
    pub fn remote_state(&self, participant_id: ParticipantId) -> Option<PresenceState> {
        self.remote.read().get(&participant_id).cloned()
    }

    /// Copy of the whole remote mapping
    pub fn remote_states(&self) -> PresenceSnapshot {
        self.remote.read().clone()
    }

    /// Number of known remote participants
    pub fn remote_count(&self) -> usize {
        self.remote.read().len()
    }

    /// Insert or wholesale replace one remote entry
    pub fn apply_update(&self, state: PresenceState) {
        tracing::trace!(
            participant_id = %state.participant_id,
            status = %state.status,
            availability = %state.availability,
            "Applying presence update"
        );

        self.remote.write().insert(state.participant_id, state);
    }

    /// Replace the entire remote mapping
    pub fn apply_snapshot(&self, snapshot: PresenceSnapshot) {
        let count = snapshot.len();
        let previous = std::mem::replace(&mut *self.remote.write(), snapshot);

        tracing::debug!(
            participants = count,
            replaced = previous.len(),
            "Applied presence snapshot"
        );
    }

    /// Forget every remote participant, returning how many were dropped
    ///
    /// Own state is untouched.
    pub fn clear(&self) -> usize {
        let removed = std::mem::take(&mut *self.remote.write()).len();

        tracing::debug!(removed = removed, "Cleared remote presence");

        removed
    }
}

impl std::fmt::Debug for PresenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceStore")
            .field("own", &*self.own.read())
            .field("remote", &self.remote.read().len())
            .finish()
    }
}
