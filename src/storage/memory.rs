//! In-memory storage backend (no persistence)
//!
//! Holds the dashboard state behind a mutex. Useful for:
//! - Testing without touching the filesystem
//! - Throwaway sessions (`backend = "none"` in the config)
//!
//! Cloning the backend shares the underlying state, so tests can keep a
//! handle to inspect what the engine persisted.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use super::backend::StoreBackend;
use super::error::{StorageError, StorageResult};
use crate::state::DashboardState;

/// In-memory storage backend
#[derive(Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<DashboardState>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the currently stored state.
    pub fn snapshot(&self) -> StorageResult<DashboardState> {
        self.state
            .lock()
            .map(|state| state.clone())
            .map_err(|_| StorageError::BackendError("state lock poisoned".to_string()))
    }
}

#[async_trait]
impl StoreBackend for MemoryBackend {
    async fn load(&self) -> StorageResult<DashboardState> {
        self.snapshot()
    }

    async fn save(&self, state: &DashboardState) -> StorageResult<()> {
        let mut stored = self
            .state
            .lock()
            .map_err(|_| StorageError::BackendError("state lock poisoned".to_string()))?;
        *stored = state.clone();
        Ok(())
    }

    async fn get_stats(&self) -> StorageResult<String> {
        let state = self.snapshot()?;
        Ok(format!(
            "In-Memory: {} accounts, {} metrics, {} alerts, {} briefs",
            state.accounts.len(),
            state.metrics.len(),
            state.alerts.len(),
            state.briefs.len()
        ))
    }

    async fn close(&self) -> StorageResult<()> {
        debug!("closing in-memory backend (no-op)");
        Ok(())
    }
}
