//! Firelens Table - the document table model
//!
//! Holds a fetched collection snapshot and derives what the table shows:
//! free-text search, per-field filters, a single-field sort, the column set
//! and the batch selection. All derivations are pure functions of the
//! snapshot and the view settings; `TableState` ties them together behind a
//! reducer.

mod columns;
mod filter;
mod selection;
mod sort;
mod state;
mod visible;

pub use columns::derive_columns;
pub use filter::{Filter, matches_filters, matches_search};
pub use selection::Selection;
pub use sort::{SortDirection, SortSpec, compare_field, compare_values, sort_documents};
pub use state::{TableAction, TableState};
pub use visible::compute_visible;
