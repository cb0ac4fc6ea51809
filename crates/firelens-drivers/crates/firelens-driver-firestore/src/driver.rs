//! Firestore driver implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use firelens_core::{DocumentStore, FirebaseConfig, FirelensError, Result, StoreDriver};

use crate::FirestoreConnection;

/// Default REST endpoint
pub const DEFAULT_BASE_URL: &str = "https://firestore.googleapis.com/v1";

/// Tunables for the REST client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirestoreOptions {
    /// REST endpoint, overridable for the local emulator
    pub base_url: String,
    /// Database id inside the project
    pub database_id: String,
    /// Documents requested per list page
    pub page_size: u32,
}

impl Default for FirestoreOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            database_id: "(default)".to_string(),
            page_size: 300,
        }
    }
}

/// Cloud Firestore driver
pub struct FirestoreDriver {
    options: FirestoreOptions,
}

impl FirestoreDriver {
    pub fn new() -> Self {
        Self::with_options(FirestoreOptions::default())
    }

    pub fn with_options(options: FirestoreOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FirestoreOptions {
        &self.options
    }
}

impl Default for FirestoreDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreDriver for FirestoreDriver {
    fn name(&self) -> &'static str {
        "firestore"
    }

    fn display_name(&self) -> &'static str {
        "Cloud Firestore"
    }

    #[tracing::instrument(skip(self, config), fields(project_id = %config.project_id))]
    async fn connect(&self, config: &FirebaseConfig) -> Result<Arc<dyn DocumentStore>> {
        config.validate()?;
        if self.options.page_size == 0 {
            return Err(FirelensError::Configuration(
                "page size must be greater than zero".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("firelens/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FirelensError::Connection(format!("failed to build HTTP client: {}", e)))?;

        let connection = FirestoreConnection::new(client, config, self.options.clone())?;
        tracing::info!(base = %connection.documents_root(), "Firestore client ready");
        Ok(Arc::new(connection))
    }
}
