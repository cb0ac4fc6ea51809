//! Document operations service
//!
//! Provides collection loading, single-document writes, batch updates and
//! deletes, duplication and export of the current selection.

use futures::future::join_all;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use firelens_core::{
    CollectionSnapshot, Document, DocumentStore, FirelensError, parse_cell_value,
};
use firelens_editor::{duplicate, parse_new_document};
use firelens_interchange::{BatchUpdate, ExportOptions, ExportPayload, build_payloads_with, write_payloads};

use crate::error::{ServiceError, ServiceResult};

/// Outcome of a batch in which every write succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Ids written, in request order
    pub succeeded: Vec<String>,
}

impl BatchReport {
    pub fn len(&self) -> usize {
        self.succeeded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.succeeded.is_empty()
    }
}

/// Service for document-level operations against one connected store
///
/// Write methods don't touch any in-memory snapshot; callers reload the
/// collection after a successful write.
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
}

fn validation(e: FirelensError) -> ServiceError {
    ServiceError::InvalidInput(e.to_string())
}

fn require(value: &str, what: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidInput(format!("Please enter a {}", what)));
    }
    Ok(())
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Fetch every document of a collection
    #[tracing::instrument(skip(self))]
    pub async fn load_collection(&self, name: &str) -> ServiceResult<CollectionSnapshot> {
        require(name, "collection name")?;

        let documents = self.store.list_documents(name).await.map_err(|e| {
            tracing::error!(error = %e, "failed to load collection");
            ServiceError::LoadFailed {
                collection: name.to_string(),
                message: e.to_string(),
            }
        })?;

        tracing::info!(count = documents.len(), "collection loaded");
        Ok(CollectionSnapshot::new(name, documents))
    }

    /// Add a document from JSON text.
    ///
    /// With an id the document is written at that id, replacing any existing
    /// one; without one (or with a blank one) the store assigns the id.
    #[tracing::instrument(skip(self, json_text))]
    pub async fn add_document(
        &self,
        collection: &str,
        id: Option<&str>,
        json_text: &str,
    ) -> ServiceResult<String> {
        require(collection, "collection name")?;
        require(json_text, "document JSON")?;
        let payload = parse_new_document(json_text).map_err(validation)?;

        let id = id.map(str::trim).filter(|id| !id.is_empty());
        let result = match id {
            Some(id) => self
                .store
                .set_document(collection, id, payload, false)
                .await
                .map(|_| id.to_string()),
            None => self.store.create_document(collection, None, payload).await,
        };

        let id = result.map_err(|e| {
            tracing::error!(error = %e, "failed to add document");
            ServiceError::CreateFailed(e.to_string())
        })?;
        tracing::info!(id = %id, "document added");
        Ok(id)
    }

    /// Create a collection by writing its first document
    #[tracing::instrument(skip(self, json_text))]
    pub async fn create_collection(
        &self,
        name: &str,
        id: Option<&str>,
        json_text: &str,
    ) -> ServiceResult<String> {
        if name.trim().is_empty() || json_text.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "Please provide both collection name and document JSON".to_string(),
            ));
        }
        match self.add_document(name, id, json_text).await {
            Err(ServiceError::CreateFailed(message)) => {
                Err(ServiceError::CollectionCreateFailed(message))
            }
            other => other,
        }
    }

    /// Write a payload over a document.
    ///
    /// Reads the current document, merges the payload's top-level fields over
    /// it and writes the result with merge semantics. A document that no
    /// longer exists is written with the payload alone.
    #[tracing::instrument(skip(self, payload), fields(fields = payload.len()))]
    pub async fn update_document(
        &self,
        collection: &str,
        id: &str,
        payload: Map<String, Value>,
    ) -> ServiceResult<()> {
        let payload = firelens_core::strip_id(payload);
        self.merge_write(collection, id, payload)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to update document");
                ServiceError::UpdateFailed(e.to_string())
            })?;
        tracing::info!("document updated");
        Ok(())
    }

    async fn merge_write(
        &self,
        collection: &str,
        id: &str,
        payload: Map<String, Value>,
    ) -> firelens_core::Result<()> {
        match self.store.get_document(collection, id).await? {
            Some(current) => {
                let mut merged = current.payload();
                merged.extend(payload);
                self.store.set_document(collection, id, merged, true).await
            }
            None => {
                tracing::debug!("document missing, writing payload as a new document");
                self.store.set_document(collection, id, payload, false).await
            }
        }
    }

    /// Inline cell edit: parse the text and write the document's full payload
    #[tracing::instrument(skip(self, doc, raw), fields(id = %doc.id))]
    pub async fn update_field(
        &self,
        collection: &str,
        doc: &Document,
        field: &str,
        raw: &str,
    ) -> ServiceResult<()> {
        require(field, "field name")?;
        if field == firelens_core::ID_FIELD {
            return Err(ServiceError::InvalidInput(
                "The id field can't be edited".to_string(),
            ));
        }

        let mut payload = doc.payload();
        payload.insert(field.to_string(), parse_cell_value(raw));
        self.update_document(collection, &doc.id, payload).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_document(&self, collection: &str, id: &str) -> ServiceResult<()> {
        self.store
            .delete_document(collection, id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to delete document");
                ServiceError::DeleteFailed(e.to_string())
            })?;
        tracing::info!("document deleted");
        Ok(())
    }

    /// Delete every id concurrently
    #[tracing::instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn batch_delete(&self, collection: &str, ids: &[String]) -> ServiceResult<BatchReport> {
        if ids.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Select at least one document".to_string(),
            ));
        }

        let results = join_all(
            ids.iter()
                .map(|id| async move { self.store.delete_document(collection, id).await }),
        )
        .await;

        collect_batch("delete", ids, results)
    }

    /// Set one field on every id concurrently.
    ///
    /// Each document is read, updated and written on its own; writes that
    /// succeed stay applied when others fail. A document that no longer
    /// exists counts as a failure.
    #[tracing::instrument(skip(self, update, ids), fields(field = %update.field, count = ids.len()))]
    pub async fn batch_update(
        &self,
        collection: &str,
        update: &BatchUpdate,
        ids: &[String],
    ) -> ServiceResult<BatchReport> {
        if ids.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Please provide a field name and select at least one document".to_string(),
            ));
        }

        let results = join_all(ids.iter().map(|id| async move {
            let current = self
                .store
                .get_document(collection, id)
                .await?
                .ok_or_else(|| FirelensError::NotFound(format!("document '{}'", id)))?;
            self.store
                .set_document(collection, id, update.apply(&current), true)
                .await
        }))
        .await;

        collect_batch("update", ids, results)
    }

    /// Create a copy of a document under `{id}_copy_{millis}`; returns the new id
    #[tracing::instrument(skip(self, doc), fields(id = %doc.id))]
    pub async fn duplicate_document(&self, collection: &str, doc: &Document) -> ServiceResult<String> {
        let copy = duplicate(doc);
        let id = self
            .store
            .create_document(collection, Some(&copy.new_id), copy.payload)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to duplicate document");
                ServiceError::DuplicateFailed(e.to_string())
            })?;
        tracing::info!(new_id = %id, "document duplicated");
        Ok(id)
    }

    /// Render the given ids of the snapshot into export files
    pub fn export_selected(
        &self,
        snapshot: &CollectionSnapshot,
        ids: &[String],
        options: &ExportOptions,
    ) -> ServiceResult<Vec<ExportPayload>> {
        let docs = snapshot.select(ids.iter().map(String::as_str));
        if docs.len() < ids.len() {
            tracing::warn!(
                requested = ids.len(),
                found = docs.len(),
                "some selected documents are not in the snapshot"
            );
        }
        Ok(build_payloads_with(&snapshot.collection, &docs, options)?)
    }

    /// Export the given ids and write the files into `dir`
    #[tracing::instrument(skip(self, snapshot, ids, options), fields(collection = %snapshot.collection, dir = %dir.display()))]
    pub async fn export_to_dir(
        &self,
        snapshot: &CollectionSnapshot,
        ids: &[String],
        options: &ExportOptions,
        dir: &Path,
    ) -> ServiceResult<Vec<PathBuf>> {
        let payloads = self.export_selected(snapshot, ids, options)?;
        Ok(write_payloads(dir, &payloads).await?)
    }
}

fn collect_batch(
    action: &'static str,
    ids: &[String],
    results: Vec<firelens_core::Result<()>>,
) -> ServiceResult<BatchReport> {
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    let mut first_error = None;

    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(()) => succeeded.push(id.clone()),
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "batch {} failed for document", action);
                failed.push(id.clone());
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        None => {
            tracing::info!(count = succeeded.len(), "batch {} complete", action);
            Ok(BatchReport { succeeded })
        }
        Some(e) => Err(ServiceError::BatchFailed {
            action,
            total: ids.len(),
            failed,
            message: e.to_string(),
        }),
    }
}
