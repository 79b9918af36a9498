//! Presence client
//!
//! Facade a host integrates with: local setters and getters, inbound frame
//! handling, and the connect/disconnect hooks.

mod builder;

pub use builder::PresenceClientBuilder;

use crate::presentation::Presentation;
use crate::protocol::{Frame, FrameError, PresenceMessage, PresenceSnapshot};
use crate::publisher::Publisher;
use crate::reconciler::Reconciler;
use crate::session::{JoinNotice, SessionLifecycle, SessionState};
use crate::store::{OwnStateChange, PresenceStore};
use presence_core::{Availability, ParticipantId, PresenceState};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Presence synchronization client for one local participant
pub struct PresenceClient {
    store: Arc<PresenceStore>,
    reconciler: Reconciler,
    publisher: Arc<Publisher>,
    lifecycle: SessionLifecycle,
    /// Own-state changes, consumed by the persistence worker
    changes: broadcast::Sender<OwnStateChange>,
    persistence_task: Option<JoinHandle<()>>,
}

impl PresenceClient {
    #[must_use]
    pub fn builder() -> PresenceClientBuilder {
        PresenceClientBuilder::new()
    }

    /// Shared handle to the store, for renderers on other threads
    pub fn store(&self) -> Arc<PresenceStore> {
        self.store.clone()
    }

    /// Reconciler for a transport's delivery path
    pub fn reconciler(&self) -> Reconciler {
        self.reconciler.clone()
    }

    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    pub fn participant_id(&self) -> ParticipantId {
        self.store.owner()
    }

    pub fn own_state(&self) -> PresenceState {
        self.store.own_state()
    }

    /// Set the local status, publish it, and notify subscribers
    pub fn set_own_status(&self, status: impl Into<String>) -> PresenceState {
        self.store
            .set_own_status_and(status, |change| self.commit(change))
            .state
    }

    /// Set the local availability, publish it, and notify subscribers
    pub fn set_own_availability(&self, availability: Availability) -> PresenceState {
        self.store
            .set_own_availability_and(availability, |change| self.commit(change))
            .state
    }

    /// Runs under the own-state write lock, so frames and events keep write order
    fn commit(&self, change: &OwnStateChange) {
        self.publisher.publish(&change.state);
        // No receivers just means nothing persists; not an error
        let _ = self.changes.send(change.clone());
    }

    /// Subscribe to own-state changes
    pub fn subscribe(&self) -> broadcast::Receiver<OwnStateChange> {
        self.changes.subscribe()
    }

    pub fn remote_state(&self, participant_id: ParticipantId) -> Option<PresenceState> {
        self.store.remote_state(participant_id)
    }

    pub fn remote_states(&self) -> PresenceSnapshot {
        self.store.remote_states()
    }

    /// Icon and overlay for a remote participant, `None` if unknown
    pub fn presentation(&self, participant_id: ParticipantId) -> Option<Presentation> {
        Presentation::of_optional(self.store.remote_state(participant_id).as_ref())
    }

    /// Apply a typed inbound message
    pub fn apply(&self, message: PresenceMessage) {
        self.reconciler.apply(message);
    }

    /// Shape-check and apply an inbound frame
    pub fn handle_frame(&self, frame: &Frame) -> Result<(), FrameError> {
        self.reconciler.apply_frame(frame)
    }

    pub fn session_state(&self) -> SessionState {
        self.lifecycle.state()
    }

    /// Register a callback for the post-join advisory
    pub fn on_join_notice<F>(&self, callback: F)
    where
        F: Fn(&JoinNotice) + Send + Sync + 'static,
    {
        self.lifecycle.on_join_notice(callback);
    }

    /// Host hook: a session was joined
    pub fn on_connect(&self) {
        self.lifecycle.on_connect();
    }

    /// Host hook: the session was left
    pub fn on_disconnect(&self) {
        self.lifecycle.on_disconnect();
    }

    /// Stop the persistence worker after it has written every pending change
    pub async fn shutdown(self) {
        let Self {
            changes,
            persistence_task,
            ..
        } = self;
        drop(changes);

        if let Some(task) = persistence_task {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Persistence worker ended abnormally");
            }
        }
    }
}

impl std::fmt::Debug for PresenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceClient")
            .field("store", &self.store)
            .field("publisher", &self.publisher)
            .field("lifecycle", &self.lifecycle)
            .finish()
    }
}
