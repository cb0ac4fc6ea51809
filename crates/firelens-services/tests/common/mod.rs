//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::sync::Arc;

use firelens_core::{Document, DocumentStore, FirebaseConfig, Result, WriteOp};
use firelens_drivers::memory::MemoryStore;

/// A store call, recorded for assertions
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(String),
    Get(String),
    Create(Option<String>),
    Set { id: String, merge: bool },
    Delete(String),
    Batch(usize),
}

impl Call {
    pub fn is_write(&self) -> bool {
        !matches!(self, Call::List(_) | Call::Get(_))
    }
}

/// Wraps a [`MemoryStore`] and logs every call made through it.
///
/// Failures are injected on the inner store.
pub struct RecordingStore {
    pub inner: MemoryStore,
    pub calls: Arc<Mutex<Vec<Call>>>,
}

impl RecordingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_write).collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    fn driver_name(&self) -> &str {
        "recording"
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        self.record(Call::List(collection.to_string()));
        self.inner.list_documents(collection).await
    }

    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        self.record(Call::Get(id.to_string()));
        self.inner.get_document(collection, id).await
    }

    async fn create_document(
        &self,
        collection: &str,
        id: Option<&str>,
        payload: Map<String, Value>,
    ) -> Result<String> {
        self.record(Call::Create(id.map(str::to_string)));
        self.inner.create_document(collection, id, payload).await
    }

    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        payload: Map<String, Value>,
        merge: bool,
    ) -> Result<()> {
        self.record(Call::Set {
            id: id.to_string(),
            merge,
        });
        self.inner.set_document(collection, id, payload, merge).await
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        self.record(Call::Delete(id.to_string()));
        self.inner.delete_document(collection, id).await
    }

    async fn batch_write(&self, ops: Vec<WriteOp>) -> Result<()> {
        self.record(Call::Batch(ops.len()));
        self.inner.batch_write(ops).await
    }
}

pub fn fields(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("object literal")
}

pub fn doc(id: &str, value: Value) -> Document {
    Document::new(id, fields(value))
}

/// A store seeded with one collection
pub fn seeded(collection: &str, docs: Vec<Document>) -> Arc<RecordingStore> {
    Arc::new(RecordingStore::new(
        MemoryStore::new().with_collection(collection, docs),
    ))
}

pub fn config() -> FirebaseConfig {
    FirebaseConfig {
        api_key: "test-key".into(),
        auth_domain: "demo.firebaseapp.com".into(),
        project_id: "demo".into(),
        storage_bucket: "demo.appspot.com".into(),
        messaging_sender_id: "1234".into(),
        app_id: "1:1234:web:abcd".into(),
    }
}
