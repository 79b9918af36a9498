//! Presence client builder
//!
//! Resolves the local identity and initial own state, then wires the store,
//! reconciler, publisher, lifecycle, and persistence worker together.

use super::PresenceClient;
use crate::persistence::{FilePersistence, PersistenceWorker};
use crate::publisher::Publisher;
use crate::reconciler::Reconciler;
use crate::session::SessionLifecycle;
use crate::store::PresenceStore;
use crate::transport::{NullTransport, PresenceTransport};
use presence_common::{AppResult, ClientConfig, PresenceConfig};
use presence_core::{DomainError, ParticipantId, PresenceState, StatePersistence};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Capacity of the own-state change channel
const CHANGE_BUFFER: usize = 64;

/// Builder for [`PresenceClient`]
#[derive(Default)]
pub struct PresenceClientBuilder {
    participant_id: Option<ParticipantId>,
    config: PresenceConfig,
    transport: Option<Arc<dyn PresenceTransport>>,
    persistence: Option<Arc<dyn StatePersistence>>,
}

impl PresenceClientBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take identity, presence settings, and file persistence from a loaded config
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        let mut builder = Self::new().presence_config(config.presence.clone());
        builder.participant_id = config.identity.participant_id;
        builder.persistence(Arc::new(FilePersistence::new(
            config.presence.state_file.clone(),
        )))
    }

    /// Set the local participant's id
    #[must_use]
    pub fn participant_id(mut self, participant_id: ParticipantId) -> Self {
        self.participant_id = Some(participant_id);
        self
    }

    /// Set presence behaviour
    #[must_use]
    pub fn presence_config(mut self, config: PresenceConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the outbound transport
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn PresenceTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set where the last chosen state is saved
    #[must_use]
    pub fn persistence(mut self, persistence: Arc<dyn StatePersistence>) -> Self {
        self.persistence = Some(persistence);
        self
    }

    /// Build the client
    ///
    /// Must be called inside a tokio runtime when persistence is configured.
    ///
    /// # Errors
    /// Fails if the local participant id is missing or nil; no store is
    /// created in that case.
    pub async fn build(self) -> AppResult<PresenceClient> {
        let owner = match self.participant_id {
            Some(id) if id.is_nil() => {
                return Err(DomainError::InvalidParticipantId(id.to_string()).into())
            }
            Some(id) => id,
            None => return Err(DomainError::MissingIdentity.into()),
        };

        let own = self.initial_state(owner).await;
        let store = Arc::new(PresenceStore::new(own));

        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(NullTransport) as Arc<dyn PresenceTransport>);
        let publisher = Arc::new(Publisher::new(transport));

        let lifecycle =
            SessionLifecycle::new(store.clone(), publisher.clone(), self.config.show_join_message);
        let reconciler = Reconciler::new(store.clone());

        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        let persistence_task = self
            .persistence
            .map(|persistence| PersistenceWorker::new(persistence, changes.subscribe()).spawn());

        tracing::info!(
            participant_id = %owner,
            persist_state = self.config.persist_state,
            "Presence client ready"
        );

        Ok(PresenceClient {
            store,
            reconciler,
            publisher,
            lifecycle,
            changes,
            persistence_task,
        })
    }

    /// Own state at startup: saved values when persistent, else configured defaults
    async fn initial_state(&self, owner: ParticipantId) -> PresenceState {
        let defaults = PresenceState::new(
            owner,
            self.config.default_status.clone(),
            self.config.default_availability,
        );

        if !self.config.persist_state {
            return defaults;
        }

        let Some(persistence) = &self.persistence else {
            tracing::warn!("persist_state is set but no persistence is configured");
            return defaults;
        };

        match persistence.load().await {
            Ok(Some(saved)) => {
                tracing::debug!(
                    status = %saved.status,
                    availability = %saved.availability,
                    "Restored saved presence"
                );
                PresenceState::from_saved(owner, &saved)
            }
            Ok(None) => defaults,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load saved presence, using defaults");
                defaults
            }
        }
    }
}
