//! Firelens Core - Core abstractions for the document database console
//!
//! This crate provides the types every other Firelens crate depends on:
//!
//! - `Document` / `CollectionSnapshot` - records fetched from a collection
//! - `DocumentStore` - the database gateway trait drivers implement
//! - `StoreDriver` - factory that turns a `FirebaseConfig` into a store
//! - Value helpers converting dynamic values to and from their text forms

mod config;
mod document;
mod error;
mod store;
mod value;

pub use config::*;
pub use document::*;
pub use error::*;
pub use store::*;
pub use value::*;
