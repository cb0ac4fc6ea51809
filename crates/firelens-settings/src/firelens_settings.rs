//! Firelens Settings
//!
//! Application settings persisted as JSON in the user's config directory:
//! - Storage settings (where connection profiles live)
//! - Firestore client settings (database id, page size, endpoint)
//! - Export settings (output directory, pretty printing)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod settings_file;

pub use settings_file::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FirelensSettings {
    pub storage: StorageSettings,
    pub firestore: FirestoreSettings,
    pub export: ExportSettings,
}

impl FirelensSettings {
    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::settings_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        serde_json::from_str(&content).with_context(|| "Failed to parse settings JSON")
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;
        Ok(())
    }

    pub fn settings_path() -> Result<PathBuf> {
        config_dir().map(|p| p.join("settings.json"))
    }

    /// Profile file, honoring the configured override
    pub fn profiles_path(&self) -> Result<PathBuf> {
        match &self.storage.profiles_file {
            Some(path) => Ok(path.clone()),
            None => profiles_file(),
        }
    }

    /// Export directory, honoring the configured override
    pub fn export_dir(&self) -> Result<PathBuf> {
        match &self.export.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_export_dir(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageSettings {
    /// Overrides `<data_dir>/firelens/profiles.json`
    pub profiles_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirestoreSettings {
    pub database_id: String,
    pub page_size: u32,
    /// REST endpoint; point at `http://localhost:8080/v1` for the emulator
    pub base_url: String,
}

impl Default for FirestoreSettings {
    fn default() -> Self {
        Self {
            database_id: "(default)".to_string(),
            page_size: 300,
            base_url: "https://firestore.googleapis.com/v1".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub output_dir: Option<PathBuf>,
    pub pretty: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: None,
            pretty: true,
        }
    }
}
