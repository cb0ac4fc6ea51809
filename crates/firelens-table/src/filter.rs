//! Search and field filters

use serde::{Deserialize, Serialize};

use firelens_core::{Document, display_value};

/// A case-insensitive substring filter on one field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

impl Filter {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Rows whose field name is still blank don't filter anything
    pub fn is_active(&self) -> bool {
        !self.field.trim().is_empty()
    }

    /// Whether the document has this field with a non-null value containing
    /// the filter text, ignoring case
    pub fn matches(&self, doc: &Document) -> bool {
        if !self.is_active() {
            return true;
        }
        match doc.lookup(&self.field) {
            Some(value) if !value.is_null() => display_value(&value)
                .to_lowercase()
                .contains(&self.value.to_lowercase()),
            _ => false,
        }
    }
}

/// Whether every filter matches
pub fn matches_filters(doc: &Document, filters: &[Filter]) -> bool {
    filters.iter().all(|f| f.matches(doc))
}

/// Whether the document's compact JSON (id first) contains the term, ignoring case
pub fn matches_search(doc: &Document, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let Ok(text) = serde_json::to_string(&doc.to_display_value()) else {
        return false;
    };
    text.to_lowercase().contains(&term.to_lowercase())
}
