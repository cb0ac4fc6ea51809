//! Table view state and its reducer

use firelens_core::{CollectionSnapshot, Document};

use crate::{Filter, Selection, SortDirection, SortSpec, compute_visible, derive_columns};

/// Everything the document table shows, as one value.
///
/// Updated only through [`TableState::reduce`]; each action returns the next
/// state. Loads are tagged with a generation from [`TableState::begin_load`].
/// A completed load is always applied, even when a newer one was started
/// after it, so the last load to finish wins; [`TableState::is_stale`]
/// reports when that happened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    pub snapshot: CollectionSnapshot,
    pub columns: Vec<String>,
    pub search: String,
    pub filters: Vec<Filter>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<SortDirection>,
    pub batch_mode: bool,
    pub selection: Selection,
    /// Generation of the most recently started load
    pub requested_generation: u64,
    /// Generation of the snapshot currently shown
    pub loaded_generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    SnapshotLoaded {
        generation: u64,
        snapshot: CollectionSnapshot,
    },
    SetSearch(String),
    AddFilter,
    UpdateFilter {
        index: usize,
        filter: Filter,
    },
    RemoveFilter(usize),
    /// Set both sort field and direction; `None` turns sorting off
    SetSort(Option<SortSpec>),
    /// Pick the sort field, starting ascending when no direction is set
    SetSortField(String),
    /// none → ascending → descending → none (clearing the field)
    CycleSortOrder,
    EnterBatchMode,
    ExitBatchMode,
    ToggleSelection(String),
    /// Replace the selection with every visible document
    SelectAllVisible,
    ToggleAll,
    ClearSelection,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load and return the generation to tag its result with
    pub fn begin_load(&mut self) -> u64 {
        self.requested_generation += 1;
        self.requested_generation
    }

    /// True when the shown snapshot is older than the newest requested load
    pub fn is_stale(&self) -> bool {
        self.loaded_generation < self.requested_generation
    }

    /// The active sort, if both a non-blank field and a direction are set
    pub fn sort_spec(&self) -> Option<SortSpec> {
        match (&self.sort_field, self.sort_direction) {
            (Some(field), Some(direction)) if !field.trim().is_empty() => {
                Some(SortSpec::new(field.clone(), direction))
            }
            _ => None,
        }
    }

    pub fn visible(&self) -> Vec<&Document> {
        let sort = self.sort_spec();
        compute_visible(&self.snapshot, &self.search, &self.filters, sort.as_ref())
    }

    /// Selected documents that are still in the snapshot, in selection order
    pub fn selected_documents(&self) -> Vec<&Document> {
        let ids = self.selection.ids();
        self.snapshot.select(ids.iter().map(String::as_str))
    }

    pub fn reduce(mut self, action: TableAction) -> Self {
        match action {
            TableAction::SnapshotLoaded {
                generation,
                snapshot,
            } => {
                if generation < self.loaded_generation {
                    tracing::warn!(
                        generation,
                        loaded = self.loaded_generation,
                        collection = %snapshot.collection,
                        "applying out-of-order load result"
                    );
                }
                self.columns = derive_columns(&snapshot);
                self.snapshot = snapshot;
                self.loaded_generation = generation;
                self.requested_generation = self.requested_generation.max(generation);
                self.selection.clear();
            }
            TableAction::SetSearch(term) => self.search = term,
            TableAction::AddFilter => self.filters.push(Filter::default()),
            TableAction::UpdateFilter { index, filter } => {
                if let Some(slot) = self.filters.get_mut(index) {
                    *slot = filter;
                }
            }
            TableAction::RemoveFilter(index) => {
                if index < self.filters.len() {
                    self.filters.remove(index);
                }
            }
            TableAction::SetSort(Some(spec)) => {
                self.sort_field = Some(spec.field);
                self.sort_direction = Some(spec.direction);
            }
            TableAction::SetSort(None) => {
                self.sort_field = None;
                self.sort_direction = None;
            }
            TableAction::SetSortField(field) => {
                self.sort_field = Some(field);
                if self.sort_direction.is_none() {
                    self.sort_direction = Some(SortDirection::Ascending);
                }
            }
            TableAction::CycleSortOrder => match self.sort_direction {
                None => self.sort_direction = Some(SortDirection::Ascending),
                Some(SortDirection::Ascending) => {
                    self.sort_direction = Some(SortDirection::Descending)
                }
                Some(SortDirection::Descending) => {
                    self.sort_direction = None;
                    self.sort_field = None;
                }
            },
            TableAction::EnterBatchMode => self.batch_mode = true,
            TableAction::ExitBatchMode => {
                self.batch_mode = false;
                self.selection.clear();
            }
            TableAction::ToggleSelection(id) => {
                if self.batch_mode {
                    self.selection.toggle(&id);
                }
            }
            TableAction::SelectAllVisible => {
                if self.batch_mode {
                    self.with_visible_selection(|selection, visible| {
                        selection.select_all(visible)
                    });
                }
            }
            TableAction::ToggleAll => {
                if self.batch_mode {
                    self.with_visible_selection(|selection, visible| {
                        selection.toggle_all(visible)
                    });
                }
            }
            TableAction::ClearSelection => self.selection.clear(),
        }
        self
    }

    fn with_visible_selection(&mut self, update: impl FnOnce(&mut Selection, &[&Document])) {
        let sort = self.sort_spec();
        let mut selection = std::mem::take(&mut self.selection);
        let visible = compute_visible(&self.snapshot, &self.search, &self.filters, sort.as_ref());
        update(&mut selection, &visible);
        self.selection = selection;
    }
}
