//! Integration tests for ConnectionService

mod common;

use serde_json::json;
use std::sync::Arc;

use firelens_core::{DocumentStore, FirebaseConfig};
use firelens_drivers::DriverRegistry;
use firelens_drivers::memory::{MemoryDriver, MemoryStore};
use firelens_services::{ConnectionService, DocumentService, ServiceError};

use common::{config, doc};

fn memory_service(store: Arc<MemoryStore>) -> ConnectionService {
    let mut registry = DriverRegistry::new();
    registry.register(Arc::new(MemoryDriver::with_store(store)));
    ConnectionService::with_registry(registry)
}

#[test]
fn default_service_lists_builtin_drivers() {
    let service = ConnectionService::default();
    assert_eq!(service.drivers(), vec!["firestore", "memory"]);
}

#[tokio::test]
async fn connect_returns_usable_store() {
    let store = Arc::new(MemoryStore::new().with_collection("users", vec![doc("u1", json!({"a": 1}))]));
    let service = memory_service(store);

    let connected = service.connect("memory", &config()).await.unwrap();
    assert_eq!(connected.driver_name(), "memory");

    let snapshot = DocumentService::new(connected)
        .load_collection("users")
        .await
        .unwrap();
    assert_eq!(snapshot.len(), 1);
}

#[tokio::test]
async fn connect_unknown_driver() {
    let service = memory_service(Arc::new(MemoryStore::new()));
    let err = service.connect("mongo", &config()).await.err().unwrap();
    assert!(matches!(err, ServiceError::UnknownDriver(ref name) if name == "mongo"));
    assert!(err.is_local());
}

#[tokio::test]
async fn connect_with_incomplete_config_fails() {
    let service = memory_service(Arc::new(MemoryStore::new()));
    let incomplete = FirebaseConfig {
        project_id: String::new(),
        ..config()
    };

    let err = service.connect("memory", &incomplete).await.err().unwrap();
    assert!(matches!(err, ServiceError::ConnectionFailed(_)));
    assert!(err.to_string().starts_with("Failed to connect to Firebase"));
    assert!(err.to_string().contains("projectId"));
}

#[tokio::test]
async fn firestore_driver_rejects_incomplete_config_before_network() {
    let service = ConnectionService::new();
    let err = service
        .connect("firestore", &FirebaseConfig::default())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, ServiceError::ConnectionFailed(_)));
}

#[test]
fn parse_config_snippet_accepts_console_snippet() {
    let service = ConnectionService::default();
    let snippet = r#"
        const firebaseConfig = {
          apiKey: "test-key",
          authDomain: "demo.firebaseapp.com",
          projectId: "demo",
          storageBucket: "demo.appspot.com",
          messagingSenderId: "1234",
          appId: "1:1234:web:abcd"
        };
    "#;
    assert_eq!(service.parse_config_snippet(snippet).unwrap(), config());
}

#[test]
fn parse_config_snippet_rejects_blank_and_partial() {
    let service = ConnectionService::default();
    assert!(service.parse_config_snippet("   ").unwrap_err().is_local());
    assert!(
        service
            .parse_config_snippet(r#"{"apiKey": "k"}"#)
            .unwrap_err()
            .is_local()
    );
}
