use serde_json::{Map, Value};

use firelens_core::{Document, FirelensError, Result, strip_id};

/// Read-only rendering: the fields sorted by key, pretty printed, without `id`
pub fn view_text(doc: &Document) -> String {
    pretty(&doc.sorted_fields())
}

pub(crate) fn pretty(fields: &Map<String, Value>) -> String {
    serde_json::to_string_pretty(fields).unwrap_or_else(|_| "{}".to_string())
}

/// Parse the body of a new document; it must be a JSON object
pub fn parse_new_document(json: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(fields)) => Ok(strip_id(fields)),
        Ok(other) => Err(FirelensError::InvalidFormat(format!(
            "document must be a JSON object, got {}",
            firelens_core::type_name(&other)
        ))),
        Err(e) => Err(FirelensError::InvalidFormat(format!("invalid JSON: {}", e))),
    }
}
