//! Firelens Drivers - Document store driver implementations
//!
//! This crate bundles the concrete implementations of the store traits
//! defined in `firelens-core` behind cargo features.

#[cfg(feature = "firestore")]
pub use firelens_driver_firestore as firestore;
#[cfg(feature = "memory")]
pub use firelens_driver_memory as memory;

mod registry;

pub use registry::DriverRegistry;

/// Re-export commonly used types from firelens-core
pub use firelens_core::{
    Document, DocumentStore, FirebaseConfig, FirelensError, Result, StoreDriver, WriteOp,
};

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> FirebaseConfig {
        FirebaseConfig {
            api_key: "key".into(),
            auth_domain: "demo.firebaseapp.com".into(),
            project_id: "demo".into(),
            storage_bucket: "demo.appspot.com".into(),
            messaging_sender_id: "1".into(),
            app_id: "app".into(),
        }
    }

    #[tokio::test]
    async fn test_memory_driver_through_registry() {
        let registry = DriverRegistry::with_defaults();
        let driver = registry.get("memory").expect("memory driver registered");

        let store = driver.connect(&config()).await.expect("connect");
        let id = store
            .create_document(
                "users",
                Some("u1"),
                json!({"name": "Alice"}).as_object().cloned().unwrap(),
            )
            .await
            .expect("create");
        assert_eq!(id, "u1");

        let docs = store.list_documents("users").await.expect("list");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].fields["name"], json!("Alice"));
    }
}
