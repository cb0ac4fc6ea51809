//! In-process document store for Firelens
//!
//! Keeps collections in memory with the same observable behavior as a remote
//! store: fetch order is insertion order, merges are shallow field
//! overwrites and batches are all-or-nothing. Failures can be injected per
//! document id or per collection to exercise error paths.

mod driver;
mod store;
#[cfg(test)]
mod store_tests;

pub use driver::*;
pub use store::*;
