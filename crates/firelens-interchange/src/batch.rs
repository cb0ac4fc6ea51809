//! Setting one field across many documents

use serde_json::{Map, Value};

use firelens_core::{Document, FirelensError, Result, parse_loose_value};

/// A field assignment applied to every selected document
#[derive(Debug, Clone, PartialEq)]
pub struct BatchUpdate {
    pub field: String,
    pub value: Value,
}

impl BatchUpdate {
    /// Build from form input; the value text is parsed as JSON when it can be
    pub fn new(field: &str, raw_value: &str) -> Result<Self> {
        let field = field.trim();
        if field.is_empty() {
            return Err(FirelensError::InvalidFormat(
                "batch update needs a field name".to_string(),
            ));
        }
        if field == firelens_core::ID_FIELD {
            return Err(FirelensError::InvalidFormat(
                "the id field can't be updated".to_string(),
            ));
        }
        Ok(Self {
            field: field.to_string(),
            value: parse_loose_value(raw_value),
        })
    }

    /// The document's full payload with the field overwritten
    pub fn apply(&self, doc: &Document) -> Map<String, Value> {
        let mut payload = doc.payload();
        payload.insert(self.field.clone(), self.value.clone());
        payload
    }
}
