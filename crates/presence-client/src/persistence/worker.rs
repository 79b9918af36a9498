//! Persistence worker
//!
//! Subscribes to own-state changes and writes each new value to a
//! [`StatePersistence`]. Runs on its own task so setters never wait on I/O.

use crate::store::OwnStateChange;
use presence_core::StatePersistence;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Background writer for own-state changes
pub struct PersistenceWorker {
    persistence: Arc<dyn StatePersistence>,
    receiver: broadcast::Receiver<OwnStateChange>,
}

impl PersistenceWorker {
    pub fn new(
        persistence: Arc<dyn StatePersistence>,
        receiver: broadcast::Receiver<OwnStateChange>,
    ) -> Self {
        Self {
            persistence,
            receiver,
        }
    }

    /// Spawn the worker; it ends when every change sender is dropped
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        tracing::debug!("Persistence worker started");

        loop {
            match self.receiver.recv().await {
                Ok(change) => self.save(&change).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    // Every change carries the full state, so the next one catches up
                    tracing::warn!(lagged = n, "Persistence worker lagged behind");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }

        tracing::debug!("Persistence worker stopped");
    }

    async fn save(&self, change: &OwnStateChange) {
        let saved = change.state.to_saved();

        if let Err(e) = self.persistence.save(&saved).await {
            tracing::warn!(
                event_type = change.event.event_type(),
                error = %e,
                "Failed to persist own state"
            );
        }
    }
}
