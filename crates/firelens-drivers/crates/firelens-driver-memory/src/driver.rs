//! Driver wrapper for the in-memory store

use async_trait::async_trait;
use std::sync::Arc;

use firelens_core::{DocumentStore, FirebaseConfig, Result, StoreDriver};

use crate::MemoryStore;

/// Hands out a shared [`MemoryStore`] for any complete configuration
pub struct MemoryDriver {
    store: Arc<MemoryStore>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Serve an existing store, e.g. one seeded with fixtures
    pub fn with_store(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Arc<MemoryStore> {
        self.store.clone()
    }
}

impl Default for MemoryDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreDriver for MemoryDriver {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn display_name(&self) -> &'static str {
        "In-memory"
    }

    async fn connect(&self, config: &FirebaseConfig) -> Result<Arc<dyn DocumentStore>> {
        config.validate()?;
        tracing::info!(project_id = %config.project_id, "connected to in-memory store");
        Ok(self.store.clone() as Arc<dyn DocumentStore>)
    }
}
