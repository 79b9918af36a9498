//! Loopback peer
//!
//! Plays the authoritative peer for a set of in-process clients: it keeps
//! the latest state per participant, sends a snapshot to each joiner, and
//! fans every client update out to the other members.

use crate::fixtures::TestParticipant;
use anyhow::Result;
use dashmap::DashMap;
use presence_client::protocol::snapshot_from_states;
use presence_client::reconciler::Reconciler;
use presence_client::{Frame, PresenceChannel, PresenceMessage};
use presence_core::{ParticipantId, PresenceState};
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-process authoritative peer
#[derive(Default)]
pub struct LoopbackPeer {
    members: DashMap<ParticipantId, Reconciler>,
    latest: DashMap<ParticipantId, PresenceState>,
    rejected: AtomicUsize,
}

impl LoopbackPeer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a participant: resync it with a snapshot, then run its connect hook
    pub fn join(&self, participant: &TestParticipant) -> Result<()> {
        let reconciler = participant.client.reconciler();
        reconciler.apply_frame(&self.snapshot_frame()?)?;
        self.members.insert(participant.id(), reconciler);
        participant.client.on_connect();
        Ok(())
    }

    /// Remove a participant, run its disconnect hook, and resync the rest
    pub fn leave(&self, participant: &TestParticipant) -> Result<()> {
        let id = participant.id();
        self.members.remove(&id);
        self.latest.remove(&id);
        participant.client.on_disconnect();

        let frame = self.snapshot_frame()?;
        for member in &self.members {
            member.value().apply_frame(&frame)?;
        }
        Ok(())
    }

    /// Fan out every frame the participant has sent; returns how many were relayed
    pub fn relay(&self, participant: &mut TestParticipant) -> Result<usize> {
        let sender = participant.id();
        self.relay_frames(sender, participant.sent_frames())
    }

    /// Fan out frames received from `sender`
    ///
    /// Only single updates on the client channel that carry the sender's own
    /// id are accepted; anything else is counted as rejected.
    pub fn relay_frames(&self, sender: ParticipantId, frames: Vec<Frame>) -> Result<usize> {
        let mut relayed = 0;

        for frame in frames {
            if !frame
                .known_channel()
                .is_some_and(PresenceChannel::is_client_channel)
            {
                self.rejected.fetch_add(1, Ordering::Relaxed);
                continue;
            }

            let state = match PresenceMessage::from_frame(&frame)? {
                PresenceMessage::SingleUpdate(state) if state.participant_id == sender => state,
                _ => {
                    self.rejected.fetch_add(1, Ordering::Relaxed);
                    continue;
                }
            };

            self.latest.insert(sender, state);
            for member in self.members.iter().filter(|m| *m.key() != sender) {
                member.value().apply_frame(&frame)?;
            }
            relayed += 1;
        }

        Ok(relayed)
    }

    /// Send a snapshot of the peer's current view to every member
    pub fn resync_all(&self) -> Result<()> {
        let frame = self.snapshot_frame()?;
        for member in &self.members {
            member.value().apply_frame(&frame)?;
        }
        Ok(())
    }

    pub fn latest(&self, id: ParticipantId) -> Option<PresenceState> {
        self.latest.get(&id).map(|entry| entry.value().clone())
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.load(Ordering::Relaxed)
    }

    fn snapshot_frame(&self) -> Result<Frame> {
        let snapshot = snapshot_from_states(self.latest.iter().map(|e| e.value().clone()));
        Ok(PresenceMessage::Snapshot(snapshot).to_frame()?)
    }
}
