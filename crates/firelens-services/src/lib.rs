//! Firelens Services Layer
//!
//! Sits between the UI and the domain crates. Each service method is one user
//! action: it validates input locally, talks to the store, and reports
//! failure as a [`ServiceError`] naming the action, which the UI shows as a
//! single transient [`Notification`].
//!
//! # Architecture
//!
//! ```text
//! UI Layer (firelens-app)
//!     ↓
//! Service Layer (firelens-services) ← This crate
//!     ↓
//! Domain Layer (firelens-table, firelens-editor, firelens-interchange, firelens-connection)
//!     ↓
//! Infrastructure Layer (firelens-core, firelens-drivers)
//! ```
//!
//! # Services
//!
//! - [`DocumentService`] - Collection loading, document writes, batches and export
//! - [`ConnectionService`] - Driver lookup and connecting with a Firebase config
//!
//! Nothing here retries, times out or cancels. Batches fan out every request
//! at once and report the first failure once for the whole batch.

mod connection_service;
mod document_service;
mod error;
mod notification;

pub use connection_service::ConnectionService;
pub use document_service::{BatchReport, DocumentService};
pub use error::{ServiceError, ServiceResult};
pub use notification::{Notification, NotificationLevel};
