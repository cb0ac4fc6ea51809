//! Cloud Firestore driver for Firelens
//!
//! Talks to the Firestore REST API (v1) with the project's web API key,
//! the same way the browser SDK does for unauthenticated clients.
//!
//! # Features
//!
//! - Paged collection listing following `nextPageToken`
//! - Document create/set/merge/delete
//! - Batched writes through `documents:commit`
//! - Conversion between Firestore typed values and plain JSON
//!
//! # Example
//!
//! ```ignore
//! use firelens_core::{FirebaseConfig, StoreDriver};
//! use firelens_driver_firestore::FirestoreDriver;
//!
//! let driver = FirestoreDriver::new();
//! let store = driver.connect(&config).await?;
//! let users = store.list_documents("users").await?;
//! ```

mod connection;
mod driver;
#[cfg(test)]
mod driver_tests;
#[cfg(test)]
mod http_tests;
pub mod value_codec;
#[cfg(test)]
mod value_codec_tests;

pub use connection::*;
pub use driver::*;
