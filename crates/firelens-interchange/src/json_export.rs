use serde_json::Value;

use firelens_core::Document;

use crate::ExportError;

/// `{id, ...fields sorted}` as a JSON value
pub fn to_json_value(doc: &Document) -> Value {
    doc.to_display_value()
}

/// One document, pretty printed
pub fn to_json(doc: &Document) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&to_json_value(doc))?)
}

/// All documents as one pretty-printed array, in the given order
pub fn to_json_combined(docs: &[&Document]) -> Result<String, ExportError> {
    let values: Vec<Value> = docs.iter().map(|doc| to_json_value(doc)).collect();
    Ok(serde_json::to_string_pretty(&values)?)
}
