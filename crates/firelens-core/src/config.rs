//! Firebase web-client configuration

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::{FirelensError, Result};

/// Connection parameters for a Firebase project, as issued by the Firebase console
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

impl FirebaseConfig {
    /// Field names in the order the Firebase console prints them
    pub const FIELDS: [&'static str; 6] = [
        "apiKey",
        "authDomain",
        "projectId",
        "storageBucket",
        "messagingSenderId",
        "appId",
    ];

    fn get(&self, field: &str) -> &str {
        match field {
            "apiKey" => &self.api_key,
            "authDomain" => &self.auth_domain,
            "projectId" => &self.project_id,
            "storageBucket" => &self.storage_bucket,
            "messagingSenderId" => &self.messaging_sender_id,
            "appId" => &self.app_id,
            _ => "",
        }
    }

    fn set(&mut self, field: &str, value: String) {
        match field {
            "apiKey" => self.api_key = value,
            "authDomain" => self.auth_domain = value,
            "projectId" => self.project_id = value,
            "storageBucket" => self.storage_bucket = value,
            "messagingSenderId" => self.messaging_sender_id = value,
            "appId" => self.app_id = value,
            _ => {}
        }
    }

    /// Names of required fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::FIELDS
            .iter()
            .copied()
            .filter(|f| self.get(f).trim().is_empty())
            .collect()
    }

    /// Reject configurations with blank fields before any network call
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FirelensError::Connection(format!(
                "incomplete Firebase configuration, missing: {}",
                missing.join(", ")
            )))
        }
    }

    /// Parse a pasted configuration.
    ///
    /// Accepts either a JSON object or the JavaScript snippet shown by the
    /// Firebase console (`apiKey: "..."`, one pair per line). Every field
    /// must be present.
    pub fn parse_snippet(text: &str) -> Result<Self> {
        let config = match serde_json::from_str::<FirebaseConfig>(text.trim()) {
            Ok(config) => config,
            Err(_) => Self::parse_js_object(text),
        };
        config
            .validate()
            .map_err(|e| FirelensError::InvalidFormat(e.to_string()))?;
        tracing::debug!(project_id = %config.project_id, "parsed Firebase configuration");
        Ok(config)
    }

    fn parse_js_object(text: &str) -> Self {
        static PAIR: OnceLock<Regex> = OnceLock::new();
        let pair = PAIR.get_or_init(|| {
            Regex::new(r#"(\w+)\s*:\s*["']([^"']*)["']"#).expect("valid config pair regex")
        });

        let mut config = Self::default();
        for caps in pair.captures_iter(text) {
            let key = &caps[1];
            if Self::FIELDS.contains(&key) && config.get(key).is_empty() {
                config.set(key, caps[2].to_string());
            }
        }
        config
    }
}
