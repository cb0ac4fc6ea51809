//! Firestore REST connection

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use url::Url;

use firelens_core::{Document, DocumentStore, FirebaseConfig, FirelensError, Result, WriteOp};

use crate::FirestoreOptions;
use crate::value_codec::{decode_fields, encode_fields, quote_field_path};

/// A document as returned by the REST API
#[derive(Debug, Deserialize)]
pub(crate) struct RestDocument {
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl RestDocument {
    pub fn into_document(self) -> Document {
        let id = document_id_from_name(&self.name).to_string();
        Document::new(id, decode_fields(&self.fields))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub documents: Vec<RestDocument>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Last path segment of a document resource name
pub(crate) fn document_id_from_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Extract a readable message from an error response body
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => {
            if envelope.error.status.is_empty() {
                envelope.error.message
            } else {
                format!("{} ({})", envelope.error.message, envelope.error.status)
            }
        }
        _ => format!("HTTP {}", status),
    }
}

/// A client handle bound to one Firebase project
pub struct FirestoreConnection {
    client: Client,
    api_key: String,
    /// `projects/{p}/databases/{d}/documents`
    resource_root: String,
    /// `{base}/projects/{p}/databases/{d}/documents`
    documents_root: Url,
    page_size: u32,
}

impl FirestoreConnection {
    pub fn new(client: Client, config: &FirebaseConfig, options: FirestoreOptions) -> Result<Self> {
        let resource_root = format!(
            "projects/{}/databases/{}/documents",
            config.project_id, options.database_id
        );
        let documents_root = Url::parse(&format!(
            "{}/{}",
            options.base_url.trim_end_matches('/'),
            resource_root
        ))
        .map_err(|e| FirelensError::Configuration(format!("invalid Firestore URL: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            resource_root,
            documents_root,
            page_size: options.page_size,
        })
    }

    pub fn documents_root(&self) -> &Url {
        &self.documents_root
    }

    /// Full resource name of a document, as used inside commit requests
    pub(crate) fn resource_name(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.resource_root, collection, id)
    }

    /// URL below the documents root built from raw path segments
    pub(crate) fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.documents_root.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        url
    }

    /// URL of the `documents:commit` endpoint
    pub(crate) fn commit_url(&self) -> Url {
        let mut url = self.documents_root.clone();
        let path = format!("{}:commit", url.path());
        url.set_path(&path);
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .query(&[("key", self.api_key.as_str())])
    }

    async fn send(
        &self,
        request: RequestBuilder,
        kind: fn(String) -> FirelensError,
    ) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| kind(format!("request failed: {}", e)))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        tracing::warn!(status = %status, message = %message, "Firestore request failed");
        Err(kind(message))
    }

    /// Build the body of a commit request
    pub(crate) fn commit_body(&self, ops: &[WriteOp]) -> Value {
        let writes: Vec<Value> = ops
            .iter()
            .map(|op| match op {
                WriteOp::Set {
                    collection,
                    id,
                    payload,
                    merge,
                } => {
                    let mut write = json!({
                        "update": {
                            "name": self.resource_name(collection, id),
                            "fields": encode_fields(payload),
                        }
                    });
                    if *merge {
                        let paths: Vec<String> =
                            payload.keys().map(|k| quote_field_path(k)).collect();
                        write["updateMask"] = json!({ "fieldPaths": paths });
                    }
                    write
                }
                WriteOp::Delete { collection, id } => json!({
                    "delete": self.resource_name(collection, id),
                }),
            })
            .collect();
        json!({ "writes": writes })
    }
}

#[async_trait]
impl DocumentStore for FirestoreConnection {
    fn driver_name(&self) -> &str {
        "firestore"
    }

    #[tracing::instrument(skip(self))]
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;
        let page_size = self.page_size.to_string();

        loop {
            let mut request = self
                .request(Method::GET, self.url(&[collection]))
                .query(&[("pageSize", page_size.as_str())]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ListResponse = self
                .send(request, FirelensError::Fetch)
                .await?
                .json()
                .await
                .map_err(|e| FirelensError::Fetch(format!("malformed list response: {}", e)))?;

            documents.extend(page.documents.into_iter().map(RestDocument::into_document));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(count = documents.len(), "listed documents");
        Ok(documents)
    }

    #[tracing::instrument(skip(self))]
    async fn get_document(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let response = self
            .request(Method::GET, self.url(&[collection, id]))
            .send()
            .await
            .map_err(|e| FirelensError::Fetch(format!("request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FirelensError::Fetch(error_message(status, &body)));
        }

        let document: RestDocument = response
            .json()
            .await
            .map_err(|e| FirelensError::Fetch(format!("malformed document: {}", e)))?;
        Ok(Some(document.into_document()))
    }

    #[tracing::instrument(skip(self, payload))]
    async fn create_document(
        &self,
        collection: &str,
        id: Option<&str>,
        payload: Map<String, Value>,
    ) -> Result<String> {
        let payload = firelens_core::strip_id(payload);
        let mut request = self
            .request(Method::POST, self.url(&[collection]))
            .json(&json!({ "fields": encode_fields(&payload) }));
        if let Some(id) = id {
            request = request.query(&[("documentId", id)]);
        }

        let created: RestDocument = self
            .send(request, FirelensError::Write)
            .await?
            .json()
            .await
            .map_err(|e| FirelensError::Write(format!("malformed create response: {}", e)))?;

        let id = document_id_from_name(&created.name).to_string();
        tracing::info!(id = %id, "created document");
        Ok(id)
    }

    #[tracing::instrument(skip(self, payload))]
    async fn set_document(
        &self,
        collection: &str,
        id: &str,
        payload: Map<String, Value>,
        merge: bool,
    ) -> Result<()> {
        let payload = firelens_core::strip_id(payload);
        if merge && payload.is_empty() {
            // An empty mask would turn the merge into a full overwrite
            tracing::debug!("empty merge payload, nothing to write");
            return Ok(());
        }

        let mut request = self
            .request(Method::PATCH, self.url(&[collection, id]))
            .json(&json!({ "fields": encode_fields(&payload) }));
        if merge {
            let mask: Vec<(&str, String)> = payload
                .keys()
                .map(|k| ("updateMask.fieldPaths", quote_field_path(k)))
                .collect();
            request = request.query(&mask);
        }

        self.send(request, FirelensError::Write).await?;
        tracing::debug!("document written");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, self.url(&[collection, id]));
        self.send(request, FirelensError::Write).await?;
        tracing::debug!("document deleted");
        Ok(())
    }

    #[tracing::instrument(skip(self, ops), fields(count = ops.len()))]
    async fn batch_write(&self, ops: Vec<WriteOp>) -> Result<()> {
        if ops.is_empty() {
            return Ok(());
        }
        let request = self
            .request(Method::POST, self.commit_url())
            .json(&self.commit_body(&ops));
        self.send(request, FirelensError::Write).await?;
        tracing::debug!("batch committed");
        Ok(())
    }
}
