use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DocumentStore, StoreError};

/// In-process store for tests. Starts from `T::default()` unless seeded.
#[derive(Default)]
pub struct MemoryStore<T> {
    document: RwLock<T>,
    saves: RwLock<usize>,
}

impl<T> MemoryStore<T> {
    pub fn seeded(document: T) -> Self {
        Self {
            document: RwLock::new(document),
            saves: RwLock::new(0),
        }
    }

    /// Number of `save` calls observed so far.
    pub async fn save_count(&self) -> usize {
        *self.saves.read().await
    }
}

#[async_trait]
impl<T> DocumentStore<T> for MemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn load(&self) -> Result<T, StoreError> {
        Ok(self.document.read().await.clone())
    }

    async fn save(&self, document: &T) -> Result<(), StoreError> {
        *self.document.write().await = document.clone();
        *self.saves.write().await += 1;
        Ok(())
    }
}
