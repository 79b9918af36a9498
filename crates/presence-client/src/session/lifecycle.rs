//! Session lifecycle
//!
//! Two states, driven by the host's connect and disconnect hooks. Remote
//! presence is only valid while connected.

use crate::publisher::Publisher;
use crate::store::PresenceStore;
use parking_lot::RwLock;
use presence_core::PresenceState;
use std::sync::Arc;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Not joined; remote presence is empty
    #[default]
    Disconnected,
    /// Joined; remote presence tracks the authoritative peer
    Connected,
}

/// Advisory raised after joining a session
///
/// Tells the host it may prompt the user to pick a status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinNotice {
    /// Own state at the moment of joining
    pub own_state: PresenceState,
}

type JoinNoticeCallback = Box<dyn Fn(&JoinNotice) + Send + Sync>;

/// Reacts to connect and disconnect transitions
pub struct SessionLifecycle {
    store: Arc<PresenceStore>,
    publisher: Arc<Publisher>,
    show_join_message: bool,
    state: RwLock<SessionState>,
    join_callbacks: RwLock<Vec<JoinNoticeCallback>>,
}

impl SessionLifecycle {
    /// Create a lifecycle in the disconnected state
    pub fn new(
        store: Arc<PresenceStore>,
        publisher: Arc<Publisher>,
        show_join_message: bool,
    ) -> Self {
        Self {
            store,
            publisher,
            show_join_message,
            state: RwLock::new(SessionState::Disconnected),
            join_callbacks: RwLock::new(Vec::new()),
        }
    }

    /// Get the current session state
    pub fn state(&self) -> SessionState {
        *self.state.read()
    }

    /// Check if a session is active
    pub fn is_connected(&self) -> bool {
        self.state() == SessionState::Connected
    }

    /// Register a callback for the post-join advisory
    pub fn on_join_notice<F>(&self, callback: F)
    where
        F: Fn(&JoinNotice) + Send + Sync + 'static,
    {
        self.join_callbacks.write().push(Box::new(callback));
    }

    /// Handle joining a session
    ///
    /// Re-publishes own state even if it did not change since the last
    /// session, so the peer and other participants learn the current value.
    pub fn on_connect(&self) {
        *self.state.write() = SessionState::Connected;

        // Publish under the own-state lock so a concurrent setter's frame can't be overtaken
        let own_state = self.store.with_own_state(|own| {
            self.publisher.publish(own);
            own.clone()
        });

        tracing::info!(
            participant_id = %own_state.participant_id,
            status = %own_state.status,
            availability = %own_state.availability,
            "Joined presence session"
        );

        if self.show_join_message {
            let notice = JoinNotice { own_state };
            for callback in self.join_callbacks.read().iter() {
                callback(&notice);
            }
        }
    }

    /// Handle leaving a session
    ///
    /// Drops all remote presence unconditionally; own state is kept.
    pub fn on_disconnect(&self) {
        *self.state.write() = SessionState::Disconnected;

        let removed = self.store.clear();

        tracing::info!(removed = removed, "Left presence session");
    }
}

impl std::fmt::Debug for SessionLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionLifecycle")
            .field("state", &self.state())
            .field("show_join_message", &self.show_join_message)
            .field("join_callbacks", &self.join_callbacks.read().len())
            .finish()
    }
}
