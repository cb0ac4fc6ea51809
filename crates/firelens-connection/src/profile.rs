//! Saved connection profile

use chrono::{DateTime, Utc};
use firelens_core::FirebaseConfig;
use serde::{Deserialize, Serialize};

/// A saved Firebase connection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name, unique within the profile list
    pub name: String,

    /// Firebase web-client configuration
    pub config: FirebaseConfig,

    /// Collections opened with this profile, in the order they were first opened
    #[serde(default)]
    pub collections: Vec<String>,

    /// Last modified timestamp
    #[serde(default = "Utc::now")]
    pub modified_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(name: impl Into<String>, config: FirebaseConfig) -> Self {
        let name = name.into();
        tracing::debug!(name = %name, project_id = %config.project_id, "creating profile");
        Self {
            name,
            config,
            collections: Vec::new(),
            modified_at: Utc::now(),
        }
    }

    pub fn with_collections(mut self, collections: Vec<String>) -> Self {
        self.collections = Vec::new();
        for collection in collections {
            self.add_collection(&collection);
        }
        self
    }

    /// Record a collection name; returns false when it was already known
    pub fn add_collection(&mut self, collection: &str) -> bool {
        if self.collections.iter().any(|c| c == collection) {
            return false;
        }
        self.collections.push(collection.to_string());
        self.modified_at = Utc::now();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_collections_drops_duplicates() {
        let profile = Profile::new("prod", FirebaseConfig::default()).with_collections(vec![
            "users".into(),
            "orders".into(),
            "users".into(),
        ]);
        assert_eq!(profile.collections, vec!["users", "orders"]);
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let json = r#"{"name":"dev","config":{"apiKey":"k","projectId":"p"}}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.name, "dev");
        assert_eq!(profile.config.api_key, "k");
        assert_eq!(profile.config.project_id, "p");
        assert!(profile.collections.is_empty());
    }
}
