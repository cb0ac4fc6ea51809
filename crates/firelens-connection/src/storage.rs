//! Profile persistence

use async_trait::async_trait;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

use firelens_core::Result;

use crate::Profile;

/// Durable storage for the profile list.
///
/// The list is always read and written as a whole.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn load_profiles(&self) -> Result<Vec<Profile>>;

    async fn save_profiles(&self, profiles: &[Profile]) -> Result<()>;
}

/// Profiles kept as a pretty-printed JSON array in a file
pub struct JsonFileProfileStore {
    path: PathBuf,
}

impl JsonFileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileStore for JsonFileProfileStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_profiles(&self) -> Result<Vec<Profile>> {
        if !self.path.exists() {
            tracing::debug!("profile file doesn't exist, starting empty");
            return Ok(Vec::new());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let profiles: Vec<Profile> = serde_json::from_str(&content)?;

        tracing::info!(count = profiles.len(), "profiles loaded from storage");
        Ok(profiles)
    }

    #[tracing::instrument(skip(self, profiles), fields(path = %self.path.display()))]
    async fn save_profiles(&self, profiles: &[Profile]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(profiles)?;
        tokio::fs::write(&self.path, content).await?;

        tracing::info!(count = profiles.len(), "profiles saved to storage");
        Ok(())
    }
}

/// In-process profile storage
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<Vec<Profile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
        }
    }

    /// What was last saved
    pub fn saved(&self) -> Vec<Profile> {
        self.profiles.read().clone()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn load_profiles(&self) -> Result<Vec<Profile>> {
        Ok(self.profiles.read().clone())
    }

    async fn save_profiles(&self, profiles: &[Profile]) -> Result<()> {
        *self.profiles.write() = profiles.to_vec();
        Ok(())
    }
}
