//! Persistence port - durable storage of the local participant's last state
//!
//! The domain layer defines what it needs; adapters (file, memory) live in
//! the client crate.

use async_trait::async_trait;

use crate::entities::SavedPresence;
use crate::error::DomainError;

/// Result type for persistence operations
pub type PersistResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait StatePersistence: Send + Sync {
    /// Load the last saved state, `None` if nothing has been saved yet
    async fn load(&self) -> PersistResult<Option<SavedPresence>>;

    /// Save the current state, replacing any previous record
    async fn save(&self, saved: &SavedPresence) -> PersistResult<()>;
}
