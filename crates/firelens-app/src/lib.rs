//! Firelens - a console for browsing and editing Firestore collections
//!
//! This crate holds what the UI binds to: the [`SessionState`] reducer
//! tracking profiles, the active connection and opened collections, the
//! [`AppState`] that wires settings, profiles and services together, and
//! the logging setup.

mod app;
pub mod logging;
mod session;

pub use app::{AppState, DEFAULT_DRIVER, export_options, firestore_options};
pub use session::{ConnectionStatus, SessionAction, SessionState};
