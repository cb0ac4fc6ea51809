//! Batch-mode document selection

use std::collections::HashMap;

use firelens_core::Document;

/// Set of selected document ids.
///
/// Toggling is O(1); `ids()` returns ids in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashMap<String, u64>,
    next_seq: u64,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the id if absent, remove it if present; returns whether it is now selected
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id).is_some() {
            return false;
        }
        self.insert(id);
        true
    }

    pub fn insert(&mut self, id: &str) {
        if !self.selected.contains_key(id) {
            self.selected.insert(id.to_string(), self.next_seq);
            self.next_seq += 1;
        }
    }

    /// Select exactly the given documents
    pub fn select_all(&mut self, visible: &[&Document]) {
        self.clear();
        for doc in visible {
            self.insert(&doc.id);
        }
    }

    /// Clear when every visible document is already selected, else select them all
    pub fn toggle_all(&mut self, visible: &[&Document]) {
        let all_selected =
            !visible.is_empty() && visible.iter().all(|doc| self.contains(&doc.id));
        if all_selected {
            self.clear();
        } else {
            self.select_all(visible);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.next_seq = 0;
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected ids in selection order
    pub fn ids(&self) -> Vec<String> {
        let mut entries: Vec<(&String, &u64)> = self.selected.iter().collect();
        entries.sort_by_key(|(_, seq)| **seq);
        entries.into_iter().map(|(id, _)| id.clone()).collect()
    }
}
