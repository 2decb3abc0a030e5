//! Storage backends for dashboard state persistence
//!
//! Durable state is the four collections (accounts, metrics, alerts, briefs)
//! serialized as named JSON arrays. This module provides a trait-based
//! abstraction so the engine can write through to different backends.
//!
//! ## Design
//!
//! - **Trait-based**: `StoreBackend` allows swapping implementations
//! - **Async**: all operations are async for compatibility with Tokio
//! - **Write-through**: the engine saves the full snapshot after every
//!   mutating operation, so backends only need whole-state load/save
//!
//! ## Backends
//!
//! - **JSON file** (default): one local file holding the four keyed arrays
//! - **In-Memory**: no persistence, for testing or throwaway sessions

pub mod backend;
pub mod error;
pub mod json;
pub mod memory;

pub use backend::StoreBackend;
pub use error::{StorageError, StorageResult};
pub use json::JsonFileBackend;
pub use memory::MemoryBackend;

use crate::config::StorageConfig;

/// Build a backend from its configuration.
pub fn create_backend(config: &StorageConfig) -> Box<dyn StoreBackend> {
    match config {
        StorageConfig::None => Box::new(MemoryBackend::default()),
        StorageConfig::Json { path } => Box::new(JsonFileBackend::new(path)),
    }
}
