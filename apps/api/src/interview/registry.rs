use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use super::models::Candidate;
use crate::store::{DocumentStore, StoreError};

/// Result of trying to add a candidate to the passed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Inserted,
    Duplicate,
}

/// The passed-candidate list.
///
/// Owns the candidate store. Every mutation holds `writer` across its
/// load-modify-save cycle, so two requests in this process can neither
/// insert the same email twice nor drop each other's writes.
pub struct CandidateRegistry {
    store: Arc<dyn DocumentStore<Vec<Candidate>>>,
    writer: Mutex<()>,
}

impl CandidateRegistry {
    pub fn new(store: Arc<dyn DocumentStore<Vec<Candidate>>>) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
        }
    }

    pub async fn list(&self) -> Result<Vec<Candidate>, StoreError> {
        self.store.load().await
    }

    /// Appends `candidate` unless one with the same email is already on file.
    pub async fn admit(&self, candidate: Candidate) -> Result<Admission, StoreError> {
        let _guard = self.writer.lock().await;

        let mut candidates = self.store.load().await?;
        if candidates.iter().any(|c| c.has_email(&candidate.email)) {
            return Ok(Admission::Duplicate);
        }

        info!(candidate_id = %candidate.id, total = candidates.len() + 1, "Candidate added to passed list");
        candidates.push(candidate);
        self.store.save(&candidates).await?;
        Ok(Admission::Inserted)
    }

    /// Removes the candidate with `id`. Returns whether anything was removed;
    /// the store is rewritten either way.
    pub async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let _guard = self.writer.lock().await;

        let mut candidates = self.store.load().await?;
        let before = candidates.len();
        candidates.retain(|c| c.id != id);
        let removed = candidates.len() != before;

        self.store.save(&candidates).await?;
        Ok(removed)
    }
}
