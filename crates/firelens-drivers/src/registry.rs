//! Driver registry for managing available store drivers

use std::collections::HashMap;
use std::sync::Arc;
use firelens_core::StoreDriver;

/// Registry of available store drivers
pub struct DriverRegistry {
    drivers: HashMap<String, Arc<dyn StoreDriver>>,
}

impl DriverRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            drivers: HashMap::new(),
        }
    }

    /// Create a registry with all built-in drivers registered
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        #[cfg(feature = "firestore")]
        registry.register(Arc::new(crate::firestore::FirestoreDriver::new()));
        #[cfg(feature = "memory")]
        registry.register(Arc::new(crate::memory::MemoryDriver::new()));

        registry
    }

    /// Register a new driver, replacing any driver with the same name
    pub fn register(&mut self, driver: Arc<dyn StoreDriver>) {
        let name = driver.name().to_string();
        tracing::info!(driver = %name, "registering store driver");
        self.drivers.insert(name, driver);
    }

    /// Get a driver by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn StoreDriver>> {
        let driver = self.drivers.get(name).cloned();
        if driver.is_none() {
            tracing::warn!(driver = %name, "driver not found in registry");
        }
        driver
    }

    /// List all registered driver names, sorted
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.drivers.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Check if a driver is registered
    pub fn has(&self, name: &str) -> bool {
        self.drivers.contains_key(name)
    }
}

impl Default for DriverRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
