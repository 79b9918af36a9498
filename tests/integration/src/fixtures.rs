//! Test fixtures
//!
//! Builders for clients wired to a channel transport.

use anyhow::Result;
use presence_client::{ChannelTransport, Frame, PresenceClient};
use presence_common::PresenceConfig;
use presence_core::{ParticipantId, StatePersistence};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Outbound buffer used by test clients
pub const TEST_BUFFER: usize = 32;

/// A client plus the receiving end of its outbound transport
pub struct TestParticipant {
    pub client: PresenceClient,
    pub outbound: mpsc::Receiver<Frame>,
}

impl TestParticipant {
    /// Client with a fresh id and default presence settings
    pub async fn start() -> Result<Self> {
        Self::start_with(PresenceConfig::default(), None).await
    }

    /// Client with custom presence settings and optional persistence
    pub async fn start_with(
        config: PresenceConfig,
        persistence: Option<Arc<dyn StatePersistence>>,
    ) -> Result<Self> {
        let (transport, outbound) = ChannelTransport::new(TEST_BUFFER);
        let mut builder = PresenceClient::builder()
            .participant_id(ParticipantId::random())
            .presence_config(config)
            .transport(Arc::new(transport));
        if let Some(persistence) = persistence {
            builder = builder.persistence(persistence);
        }

        Ok(Self {
            client: builder.build().await?,
            outbound,
        })
    }

    pub fn id(&self) -> ParticipantId {
        self.client.participant_id()
    }

    /// Drain every frame the client has sent so far
    pub fn sent_frames(&mut self) -> Vec<Frame> {
        let mut frames = Vec::new();
        while let Ok(frame) = self.outbound.try_recv() {
            frames.push(frame);
        }
        frames
    }
}

/// Presence settings that restore saved state from the given file
pub fn persistent_config(state_file: impl Into<std::path::PathBuf>) -> PresenceConfig {
    PresenceConfig {
        persist_state: true,
        state_file: state_file.into(),
        ..PresenceConfig::default()
    }
}
