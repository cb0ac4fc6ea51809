//! Document database gateway traits

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::{Document, FirebaseConfig, Result};

/// A single write inside a batch
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Replace (or, with `merge`, overwrite only the given top-level fields of) a document
    Set {
        collection: String,
        id: String,
        payload: Map<String, Value>,
        merge: bool,
    },
    /// Delete a document
    Delete { collection: String, id: String },
}

impl WriteOp {
    pub fn set(
        collection: impl Into<String>,
        id: impl Into<String>,
        payload: Map<String, Value>,
        merge: bool,
    ) -> Self {
        WriteOp::Set {
            collection: collection.into(),
            id: id.into(),
            payload: crate::strip_id(payload),
            merge,
        }
    }

    pub fn delete(collection: impl Into<String>, id: impl Into<String>) -> Self {
        WriteOp::Delete {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// The document id this write targets
    pub fn id(&self) -> &str {
        match self {
            WriteOp::Set { id, .. } | WriteOp::Delete { id, .. } => id,
        }
    }
}

/// A client handle to a document database.
///
/// Implementations surface failures as `Fetch` errors for reads and `Write`
/// errors for mutations. None of the methods retry, time out or can be
/// cancelled beyond what the underlying client does on its own.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Driver name (e.g., "firestore", "memory")
    fn driver_name(&self) -> &str;

    /// Fetch every document of a collection, in the order the backend returns them
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>>;

    /// Fetch a single document, `None` when it does not exist
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Create a document and return its id. Without an id the backend generates one.
    async fn create_document(
        &self,
        collection: &str,
        id: Option<&str>,
        payload: Map<String, Value>,
    ) -> Result<String>;

    /// Write a document. With `merge` only the payload's top-level fields are overwritten.
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        payload: Map<String, Value>,
        merge: bool,
    ) -> Result<()>;

    /// Delete a document
    async fn delete_document(&self, collection: &str, id: &str) -> Result<()>;

    /// Commit several writes at once; atomicity is up to the backend
    async fn batch_write(&self, ops: Vec<WriteOp>) -> Result<()>;
}

/// Factory for [`DocumentStore`] handles
#[async_trait]
pub trait StoreDriver: Send + Sync {
    /// Registry key for this driver
    fn name(&self) -> &'static str;

    /// Human readable name
    fn display_name(&self) -> &'static str;

    /// Establish a client handle. Fails with a `Connection` error on bad credentials.
    async fn connect(&self, config: &FirebaseConfig) -> Result<Arc<dyn DocumentStore>>;
}
