//! Firelens Connection - Saved connection profiles
//!
//! A profile is a named Firebase configuration plus the collections the user
//! has opened with it. The whole profile list is persisted after every
//! mutation.

mod book;
mod profile;
mod storage;

pub use book::ProfileBook;
pub use profile::Profile;
pub use storage::{JsonFileProfileStore, MemoryProfileStore, ProfileStore};
