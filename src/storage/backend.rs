//! Storage backend trait definition
//!
//! This module defines the core `StoreBackend` trait that all
//! storage implementations must implement.

use async_trait::async_trait;

use super::error::StorageResult;
use crate::state::DashboardState;

/// Trait for dashboard state persistence
///
/// The engine persists the complete state after every mutating operation
/// (write-through, not batched), so backends only deal in whole snapshots.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync` as they may be moved into the
/// auto-scan task.
///
/// ## Error Handling
///
/// Methods return `StorageResult<T>` which wraps `StorageError`.
/// Implementations should convert backend-specific errors to
/// `StorageError` variants.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Load the full dashboard state.
    ///
    /// A backend with no prior data returns the empty state: absent
    /// collections default to empty arrays on first load.
    async fn load(&self) -> StorageResult<DashboardState>;

    /// Persist the full dashboard state, replacing whatever was stored.
    async fn save(&self, state: &DashboardState) -> StorageResult<()>;

    /// Get backend-specific statistics
    ///
    /// Returns human-readable stats about the backend
    /// (e.g., "JSON store: 3 accounts, 42 metrics, 1.2KB on disk").
    async fn get_stats(&self) -> StorageResult<String>;

    /// Close the backend and release resources
    ///
    /// Gracefully shuts down the backend, flushing any pending writes.
    async fn close(&self) -> StorageResult<()>;
}
