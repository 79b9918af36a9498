//! In-memory persistence, for hosts without durable storage and for tests

use async_trait::async_trait;
use parking_lot::Mutex;
use presence_core::{PersistResult, SavedPresence, StatePersistence};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct MemoryPersistence {
    saved: Mutex<Option<SavedPresence>>,
    saves: AtomicUsize,
}

impl MemoryPersistence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a previously saved record
    #[must_use]
    pub fn with_saved(saved: SavedPresence) -> Self {
        Self {
            saved: Mutex::new(Some(saved)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Current record, if any
    pub fn saved(&self) -> Option<SavedPresence> {
        self.saved.lock().clone()
    }

    /// Number of completed saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatePersistence for MemoryPersistence {
    async fn load(&self) -> PersistResult<Option<SavedPresence>> {
        Ok(self.saved())
    }

    async fn save(&self, saved: &SavedPresence) -> PersistResult<()> {
        *self.saved.lock() = Some(saved.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
