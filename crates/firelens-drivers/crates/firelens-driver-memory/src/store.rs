//! The in-memory `DocumentStore`

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashSet;
use uuid::Uuid;

use firelens_core::{Document, DocumentStore, FirelensError, Result, WriteOp, strip_id};

type Collection = IndexMap<String, Map<String, Value>>;

/// Collections held in process memory
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<IndexMap<String, Collection>>,
    failing_ids: RwLock<HashSet<String>>,
    failing_collections: RwLock<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection with documents, replacing any existing contents
    pub fn with_collection(self, name: impl Into<String>, documents: Vec<Document>) -> Self {
        let collection = documents
            .into_iter()
            .map(|doc| (doc.id, doc.fields))
            .collect();
        self.collections.write().insert(name.into(), collection);
        self
    }

    /// Make every write that targets `id` fail
    pub fn fail_writes_for(&self, id: impl Into<String>) {
        self.failing_ids.write().insert(id.into());
    }

    /// Make every read of `collection` fail
    pub fn fail_reads_for(&self, collection: impl Into<String>) {
        self.failing_collections.write().insert(collection.into());
    }

    /// Remove all injected failures
    pub fn clear_failures(&self) {
        self.failing_ids.write().clear();
        self.failing_collections.write().clear();
    }

    /// Names of collections holding at least one document
    pub fn collection_names(&self) -> Vec<String> {
        self.collections
            .read()
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Synchronous read used by tests and diagnostics
    pub fn snapshot(&self, collection: &str, id: &str) -> Option<Document> {
        self.collections
            .read()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|fields| Document::new(id, fields.clone()))
    }

    fn check_read(&self, collection: &str) -> Result<()> {
        if self.failing_collections.read().contains(collection) {
            return Err(FirelensError::Fetch(format!(
                "failed to read collection '{}'",
                collection
            )));
        }
        Ok(())
    }

    fn check_write(&self, id: &str) -> Result<()> {
        if self.failing_ids.read().contains(id) {
            return Err(FirelensError::Write(format!(
                "write rejected for document '{}'",
                id
            )));
        }
        Ok(())
    }

    fn generate_id() -> String {
        Uuid::new_v4().simple().to_string()[..20].to_string()
    }

    fn apply_set(
        collections: &mut IndexMap<String, Collection>,
        collection: &str,
        id: &str,
        payload: Map<String, Value>,
        merge: bool,
    ) {
        let docs = collections.entry(collection.to_string()).or_default();
        let payload = strip_id(payload);
        match docs.get_mut(id) {
            Some(existing) if merge => existing.extend(payload),
            Some(existing) => *existing = payload,
            None => {
                docs.insert(id.to_string(), payload);
            }
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn driver_name(&self) -> &str {
        "memory"
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        self.check_read(collection)?;
        let documents: Vec<Document> = self
            .collections
            .read()
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, fields)| Document::new(id.clone(), fields.clone()))
                    .collect()
            })
            .unwrap_or_default();
        tracing::debug!(collection = %collection, count = documents.len(), "listed documents");
        Ok(documents)
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.check_read(collection)?;
        Ok(self.snapshot(collection, id))
    }

    async fn create_document(
        &self,
        collection: &str,
        id: Option<&str>,
        payload: Map<String, Value>,
    ) -> Result<String> {
        let id = id.map(str::to_string).unwrap_or_else(Self::generate_id);
        self.check_write(&id)?;

        let mut collections = self.collections.write();
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(&id) {
            return Err(FirelensError::Write(format!(
                "document '{}' already exists in '{}'",
                id, collection
            )));
        }
        docs.insert(id.clone(), strip_id(payload));
        tracing::debug!(collection = %collection, id = %id, "created document");
        Ok(id)
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        payload: Map<String, Value>,
        merge: bool,
    ) -> Result<()> {
        self.check_write(id)?;
        Self::apply_set(&mut self.collections.write(), collection, id, payload, merge);
        tracing::debug!(collection = %collection, id = %id, merge, "set document");
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        self.check_write(id)?;
        if let Some(docs) = self.collections.write().get_mut(collection) {
            docs.shift_remove(id);
        }
        tracing::debug!(collection = %collection, id = %id, "deleted document");
        Ok(())
    }

    async fn batch_write(&self, ops: Vec<WriteOp>) -> Result<()> {
        // Validate every write before applying any of them
        for op in &ops {
            self.check_write(op.id())?;
        }

        let mut collections = self.collections.write();
        let count = ops.len();
        for op in ops {
            match op {
                WriteOp::Set {
                    collection,
                    id,
                    payload,
                    merge,
                } => Self::apply_set(&mut collections, &collection, &id, payload, merge),
                WriteOp::Delete { collection, id } => {
                    if let Some(docs) = collections.get_mut(&collection) {
                        docs.shift_remove(&id);
                    }
                }
            }
        }
        tracing::debug!(count, "committed batch");
        Ok(())
    }
}
