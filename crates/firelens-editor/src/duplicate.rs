//! Document duplication

use serde_json::{Map, Value};

use firelens_core::Document;

/// A copy of a document ready to be created under a new id
#[derive(Debug, Clone, PartialEq)]
pub struct Duplicate {
    pub new_id: String,
    /// Source fields, without `id`
    pub payload: Map<String, Value>,
}

impl Duplicate {
    /// Pretty JSON of the payload, for pre-filling the new-document form
    pub fn json_text(&self) -> String {
        crate::view::pretty(&self.payload)
    }
}

/// Copy a document under `{id}_copy_{unix millis}`
pub fn duplicate(doc: &Document) -> Duplicate {
    duplicate_at(doc, chrono::Utc::now().timestamp_millis())
}

pub fn duplicate_at(doc: &Document, millis: i64) -> Duplicate {
    Duplicate {
        new_id: format!("{}_copy_{}", doc.id, millis),
        payload: doc.payload(),
    }
}
