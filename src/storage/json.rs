//! JSON file storage backend
//!
//! This backend mirrors the durable format of the original dashboard: one
//! key-value document holding the four collections as named JSON arrays.
//! Keys absent from the file deserialize as empty arrays, so a fresh or
//! partially written store loads cleanly.
//!
//! ## Durability
//!
//! Saves write to a temporary sibling file and rename it over the store,
//! so a crash mid-write never leaves a truncated document behind.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::backend::StoreBackend;
use super::error::{StorageError, StorageResult};
use crate::state::DashboardState;

/// JSON file storage backend
///
/// Stores the dashboard state in a single local JSON file. Suitable for the
/// single-process, synchronous write-through model of this engine.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend for the given store file.
    ///
    /// The file (and its parent directory) is created lazily on first save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl StoreBackend for JsonFileBackend {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> StorageResult<DashboardState> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("store file missing, starting with empty state");
                return Ok(DashboardState::default());
            }
            Err(err) => return Err(StorageError::IoError(err)),
        };

        let state = serde_json::from_slice::<DashboardState>(&bytes)?;
        debug!(
            accounts = state.accounts.len(),
            metrics = state.metrics.len(),
            alerts = state.alerts.len(),
            briefs = state.briefs.len(),
            "loaded store"
        );
        Ok(state)
    }

    #[instrument(skip_all, fields(path = %self.path.display()))]
    async fn save(&self, state: &DashboardState) -> StorageResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(state)?;
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!("persisted {} bytes", bytes.len());
        Ok(())
    }

    async fn get_stats(&self) -> StorageResult<String> {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) => Ok(format!(
                "JSON store at {}: {} bytes on disk",
                self.path.display(),
                meta.len()
            )),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Ok(format!("JSON store at {}: empty", self.path.display()))
            }
            Err(err) => Err(StorageError::IoError(err)),
        }
    }

    async fn close(&self) -> StorageResult<()> {
        debug!("closing JSON file backend (no-op)");
        Ok(())
    }
}
