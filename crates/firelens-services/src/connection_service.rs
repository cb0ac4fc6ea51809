//! Connection service
//!
//! Resolves a driver by name and opens a store with a Firebase config.

use std::sync::Arc;

use firelens_core::{DocumentStore, FirebaseConfig};
use firelens_drivers::DriverRegistry;

use crate::error::{ServiceError, ServiceResult};

/// Service for establishing store connections
pub struct ConnectionService {
    registry: DriverRegistry,
}

impl ConnectionService {
    /// Create a service over every built-in driver
    pub fn new() -> Self {
        Self::with_registry(DriverRegistry::with_defaults())
    }

    pub fn with_registry(registry: DriverRegistry) -> Self {
        Self { registry }
    }

    /// Names of the available drivers, sorted
    pub fn drivers(&self) -> Vec<&str> {
        self.registry.list()
    }

    /// Open a store for `config` through the named driver.
    ///
    /// Replaces nothing on failure: the caller keeps whatever store it held.
    #[tracing::instrument(skip(self, config), fields(project_id = %config.project_id))]
    pub async fn connect(
        &self,
        driver: &str,
        config: &FirebaseConfig,
    ) -> ServiceResult<Arc<dyn DocumentStore>> {
        let driver = self
            .registry
            .get(driver)
            .ok_or_else(|| ServiceError::UnknownDriver(driver.to_string()))?;

        tracing::info!(driver = driver.name(), "connecting");
        let store = driver.connect(config).await.map_err(|e| {
            tracing::error!(error = %e, "connection failed");
            ServiceError::ConnectionFailed(e.to_string())
        })?;

        tracing::info!(driver = store.driver_name(), "connected");
        Ok(store)
    }

    /// Parse a pasted config snippet (JSON or the console's JS object)
    pub fn parse_config_snippet(&self, text: &str) -> ServiceResult<FirebaseConfig> {
        if text.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "Please paste a Firebase configuration".to_string(),
            ));
        }
        FirebaseConfig::parse_snippet(text).map_err(|e| ServiceError::InvalidInput(e.to_string()))
    }
}

impl Default for ConnectionService {
    fn default() -> Self {
        Self::new()
    }
}
