//! JSON file persistence

use async_trait::async_trait;
use presence_core::{DomainError, PersistResult, SavedPresence, StatePersistence};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores the last chosen state as a small JSON document
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    /// Create a persistence backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StatePersistence for FilePersistence {
    async fn load(&self) -> PersistResult<Option<SavedPresence>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DomainError::Persistence(format!(
                    "read {}: {e}",
                    self.path.display()
                )))
            }
        };

        let saved = serde_json::from_slice(&raw).map_err(|e| {
            DomainError::Persistence(format!("decode {}: {e}", self.path.display()))
        })?;

        Ok(Some(saved))
    }

    async fn save(&self, saved: &SavedPresence) -> PersistResult<()> {
        let body = serde_json::to_vec_pretty(saved)
            .map_err(|e| DomainError::Persistence(format!("encode: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::Persistence(format!("create {}: {e}", parent.display()))
            })?;
        }

        // Write beside the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|e| DomainError::Persistence(format!("write {}: {e}", tmp.display())))?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            DomainError::Persistence(format!("rename {}: {e}", self.path.display()))
        })?;

        tracing::debug!(path = %self.path.display(), "Saved presence state");

        Ok(())
    }
}
