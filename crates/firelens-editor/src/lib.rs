//! Firelens Editor - editing a single document
//!
//! A document is edited either as one pretty-printed JSON text or as a list
//! of key/value rows. Both views are derived from the same sorted field map
//! and either one can be committed into a write payload.

mod duplicate;
mod edit_state;
#[cfg(test)]
mod edit_state_tests;
mod view;

pub use duplicate::{Duplicate, duplicate, duplicate_at};
pub use edit_state::{EditMode, EditState, FieldEntry, begin_edit, commit};
pub use view::{parse_new_document, view_text};
