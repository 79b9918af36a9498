//! Snapshot payload
//!
//! A snapshot is the complete remote population keyed by participant id.

use presence_core::{ParticipantId, PresenceState};
use std::collections::HashMap;

/// Complete known remote population
pub type PresenceSnapshot = HashMap<ParticipantId, PresenceState>;

/// Build a snapshot from a list of states, keyed by each state's own id
///
/// Later entries for the same participant replace earlier ones.
pub fn snapshot_from_states<I>(states: I) -> PresenceSnapshot
where
    I: IntoIterator<Item = PresenceState>,
{
    states
        .into_iter()
        .map(|state| (state.participant_id, state))
        .collect()
}

/// Find the first entry whose key disagrees with its embedded participant id
pub fn find_mismatched_key(snapshot: &PresenceSnapshot) -> Option<ParticipantId> {
    snapshot
        .iter()
        .find(|(key, state)| **key != state.participant_id)
        .map(|(key, _)| *key)
}
