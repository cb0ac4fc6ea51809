//! Edit session for one document

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use firelens_core::{Document, FirelensError, Result, edit_text, parse_loose_value, strip_id};

use crate::view::pretty;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EditMode {
    /// The whole document as one JSON text
    #[default]
    Text,
    /// One row per top-level field
    Fields,
}

/// One row of the field-list editor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldEntry {
    pub key: String,
    pub value: String,
    /// Value the row started with; kept when its text is left untouched
    original: Option<Value>,
}

impl FieldEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            original: None,
        }
    }

    fn from_value(key: &str, value: &Value) -> Self {
        Self {
            key: key.to_string(),
            value: edit_text(value),
            original: Some(value.clone()),
        }
    }

    /// The row's value: the starting value if unedited, else the text parsed loosely
    pub fn parsed(&self) -> Value {
        match &self.original {
            Some(original) if edit_text(original) == self.value => original.clone(),
            _ => parse_loose_value(&self.value),
        }
    }
}

/// Both editable representations of a document
#[derive(Debug, Clone, PartialEq)]
pub struct EditState {
    pub document_id: String,
    pub mode: EditMode,
    pub text: String,
    pub fields: Vec<FieldEntry>,
}

/// Open a document for editing, in text mode
pub fn begin_edit(doc: &Document) -> EditState {
    let sorted = doc.sorted_fields();
    EditState {
        document_id: doc.id.clone(),
        mode: EditMode::Text,
        text: pretty(&sorted),
        fields: entries(&sorted),
    }
}

fn entries(fields: &Map<String, Value>) -> Vec<FieldEntry> {
    fields
        .iter()
        .map(|(k, v)| FieldEntry::from_value(k, v))
        .collect()
}

fn sorted(fields: Map<String, Value>) -> Map<String, Value> {
    let mut pairs: Vec<(String, Value)> = fields.into_iter().collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs.into_iter().collect()
}

/// Build the write payload from the current mode's representation
pub fn commit(state: &EditState) -> Result<Map<String, Value>> {
    let fields = match state.mode {
        EditMode::Text => parse_text(&state.text)?,
        EditMode::Fields => collect_fields(&state.fields),
    };
    Ok(strip_id(fields))
}

fn parse_text(text: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(FirelensError::InvalidFormat(
            "document must be a JSON object".to_string(),
        )),
        Err(e) => Err(FirelensError::InvalidFormat(format!("invalid JSON: {}", e))),
    }
}

fn collect_fields(rows: &[FieldEntry]) -> Map<String, Value> {
    rows.iter()
        .filter(|row| !row.key.trim().is_empty())
        .map(|row| (row.key.clone(), row.parsed()))
        .collect()
}

impl EditState {
    /// Replace the JSON text; the field rows are not touched
    pub fn apply_text_edit(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Switch modes, rebuilding the target view from the current one.
    ///
    /// Leaving text mode requires the text to be a JSON object; on failure the
    /// mode is unchanged.
    pub fn switch_mode(&mut self, mode: EditMode) -> Result<()> {
        if mode == self.mode {
            return Ok(());
        }
        match mode {
            EditMode::Fields => {
                let fields = sorted(strip_id(parse_text(&self.text)?));
                self.fields = entries(&fields);
            }
            EditMode::Text => {
                self.text = pretty(&sorted(collect_fields(&self.fields)));
            }
        }
        tracing::debug!(document_id = %self.document_id, ?mode, "switched edit mode");
        self.mode = mode;
        Ok(())
    }

    pub fn set_field_key(&mut self, index: usize, key: impl Into<String>) {
        if let Some(row) = self.fields.get_mut(index) {
            row.key = key.into();
        }
    }

    pub fn set_field_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(row) = self.fields.get_mut(index) {
            row.value = value.into();
        }
    }

    /// Append a blank row
    pub fn add_field(&mut self) {
        self.fields.push(FieldEntry::default());
    }

    pub fn remove_field(&mut self, index: usize) {
        if index < self.fields.len() {
            self.fields.remove(index);
        }
    }

    pub fn commit(&self) -> Result<Map<String, Value>> {
        commit(self)
    }
}
