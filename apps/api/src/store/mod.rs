//! Whole-document persistence.
//!
//! A store holds exactly one document and offers two operations: read it all,
//! or replace it all. Absence of persisted state reads as `T::default()`.
//! Callers that need read-modify-write must serialize those cycles themselves
//! (see `interview::registry`).

use async_trait::async_trait;
use thiserror::Error;

pub mod json_file;
#[cfg(test)]
pub mod memory;

pub use json_file::JsonFileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed document: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Could not replace document: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Storage seam for a single document. Carried in `AppState` as
/// `Arc<dyn DocumentStore<T>>` so tests can swap in the in-memory backend.
#[async_trait]
pub trait DocumentStore<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Returns the persisted document, or `T::default()` when none exists yet.
    async fn load(&self) -> Result<T, StoreError>;

    /// Atomically replaces the persisted document.
    async fn save(&self, document: &T) -> Result<(), StoreError>;
}
