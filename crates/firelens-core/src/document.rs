//! Documents and collection snapshots

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

use crate::{FirelensError, Result};

/// Name of the distinguished identifier field
pub const ID_FIELD: &str = "id";

/// One record in a collection: an immutable id plus a dynamic-shape field map.
///
/// The `fields` map never contains an `id` key. The identifier is reattached
/// only when the document is rendered for display, search or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    /// Create a document, dropping any `id` key smuggled into the fields
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields: strip_id(fields),
        }
    }

    /// Build a document from a display object of the form `{"id": "...", ...}`
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(FirelensError::InvalidFormat(
                "document must be a JSON object".to_string(),
            ));
        };
        let id = match fields.remove(ID_FIELD) {
            Some(Value::String(id)) => id,
            Some(other) => {
                return Err(FirelensError::InvalidFormat(format!(
                    "document id must be a string, got {}",
                    other
                )));
            }
            None => {
                return Err(FirelensError::InvalidFormat(
                    "document is missing its id".to_string(),
                ));
            }
        };
        Ok(Self { id, fields })
    }

    /// Look up a field by name. `id` resolves to the document identifier.
    pub fn lookup(&self, name: &str) -> Option<Cow<'_, Value>> {
        if name == ID_FIELD {
            return Some(Cow::Owned(Value::String(self.id.clone())));
        }
        self.fields.get(name).map(Cow::Borrowed)
    }

    /// Field names in lexicographic order (never includes `id`)
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Non-id fields, sorted by key
    pub fn sorted_fields(&self) -> Map<String, Value> {
        self.sorted_keys()
            .into_iter()
            .filter_map(|k| self.fields.get(k).map(|v| (k.to_string(), v.clone())))
            .collect()
    }

    /// The writable payload: every field except `id`
    pub fn payload(&self) -> Map<String, Value> {
        self.fields.clone()
    }

    /// `{id, ...fields sorted}` for display, search and export
    pub fn to_display_value(&self) -> Value {
        let mut obj = Map::with_capacity(self.fields.len() + 1);
        obj.insert(ID_FIELD.to_string(), Value::String(self.id.clone()));
        obj.extend(self.sorted_fields());
        Value::Object(obj)
    }

    /// Number of non-id fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// Remove the `id` key from a write payload
pub fn strip_id(mut fields: Map<String, Value>) -> Map<String, Value> {
    if fields.remove(ID_FIELD).is_some() {
        tracing::debug!("stripped id key from document payload");
    }
    fields
}

/// The full set of documents fetched for one collection at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    pub collection: String,
    pub documents: Vec<Document>,
}

impl CollectionSnapshot {
    pub fn new(collection: impl Into<String>, documents: Vec<Document>) -> Self {
        Self {
            collection: collection.into(),
            documents,
        }
    }

    pub fn empty(collection: impl Into<String>) -> Self {
        Self::new(collection, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Find a document by id
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    /// Documents whose ids appear in `ids`, in the order of `ids`
    pub fn select<'a, 'i, I>(&'a self, ids: I) -> Vec<&'a Document>
    where
        I: IntoIterator<Item = &'i str>,
    {
        ids.into_iter().filter_map(|id| self.get(id)).collect()
    }
}
