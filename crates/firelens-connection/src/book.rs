//! In-memory profile list backed by a `ProfileStore`

use parking_lot::RwLock;
use std::sync::Arc;

use firelens_core::{FirebaseConfig, FirelensError, Result};

use crate::{Profile, ProfileStore};

/// The user's saved profiles.
///
/// Every mutation builds the new list, persists it, and only then swaps it
/// in, so a failed save leaves the book unchanged.
pub struct ProfileBook {
    store: Arc<dyn ProfileStore>,
    profiles: RwLock<Vec<Profile>>,
}

impl ProfileBook {
    /// Create a book and load the stored profiles
    pub async fn open(store: Arc<dyn ProfileStore>) -> Result<Self> {
        let profiles = store.load_profiles().await?;
        Ok(Self {
            store,
            profiles: RwLock::new(profiles),
        })
    }

    /// Snapshot of all profiles, in save order
    pub fn profiles(&self) -> Vec<Profile> {
        self.profiles.read().clone()
    }

    pub fn find(&self, name: &str) -> Option<Profile> {
        self.profiles.read().iter().find(|p| p.name == name).cloned()
    }

    /// Save a profile, replacing an existing one with the same name in place
    #[tracing::instrument(skip(self, config, collections))]
    pub async fn save_profile(
        &self,
        name: &str,
        config: FirebaseConfig,
        collections: Vec<String>,
    ) -> Result<Profile> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FirelensError::Configuration(
                "profile name is required".to_string(),
            ));
        }

        let profile = Profile::new(name, config).with_collections(collections);
        let mut next = self.profiles();
        match next.iter_mut().find(|p| p.name == name) {
            Some(existing) => {
                tracing::debug!("replacing existing profile");
                *existing = profile.clone();
            }
            None => next.push(profile.clone()),
        }

        self.commit(next).await?;
        Ok(profile)
    }

    /// Delete a profile by name; returns false when there was none
    #[tracing::instrument(skip(self))]
    pub async fn delete_profile(&self, name: &str) -> Result<bool> {
        let mut next = self.profiles();
        let before = next.len();
        next.retain(|p| p.name != name);
        if next.len() == before {
            tracing::debug!("no profile to delete");
            return Ok(false);
        }

        self.commit(next).await?;
        Ok(true)
    }

    /// Add a collection to a profile's list; known names are not duplicated
    #[tracing::instrument(skip(self))]
    pub async fn remember_collection(&self, profile: &str, collection: &str) -> Result<Profile> {
        let mut next = self.profiles();
        let entry = next
            .iter_mut()
            .find(|p| p.name == profile)
            .ok_or_else(|| FirelensError::NotFound(format!("profile '{}'", profile)))?;

        if !entry.add_collection(collection) {
            return Ok(entry.clone());
        }
        let updated = entry.clone();

        self.commit(next).await?;
        Ok(updated)
    }

    async fn commit(&self, next: Vec<Profile>) -> Result<()> {
        self.store.save_profiles(&next).await?;
        *self.profiles.write() = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryProfileStore;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    fn config(project: &str) -> FirebaseConfig {
        FirebaseConfig {
            project_id: project.to_string(),
            ..FirebaseConfig::default()
        }
    }

    async fn book() -> (Arc<MemoryProfileStore>, ProfileBook) {
        let store = Arc::new(MemoryProfileStore::new());
        let book = ProfileBook::open(store.clone()).await.unwrap();
        (store, book)
    }

    #[tokio::test]
    async fn test_save_persists_full_list() {
        let (store, book) = book().await;
        book.save_profile("dev", config("dev-1"), vec![]).await.unwrap();
        book.save_profile("prod", config("prod-1"), vec!["users".into()])
            .await
            .unwrap();

        let names: Vec<_> = store.saved().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["dev", "prod"]);
        assert_eq!(book.profiles().len(), 2);
    }

    #[tokio::test]
    async fn test_save_existing_name_replaces_in_place() {
        let (store, book) = book().await;
        book.save_profile("a", config("one"), vec![]).await.unwrap();
        book.save_profile("b", config("two"), vec![]).await.unwrap();
        book.save_profile("a", config("three"), vec![]).await.unwrap();

        let saved = store.saved();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].name, "a");
        assert_eq!(saved[0].config.project_id, "three");
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (store, book) = book().await;
        let err = book.save_profile("  ", config("x"), vec![]).await.unwrap_err();
        assert!(matches!(err, FirelensError::Configuration(_)));
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn test_delete_profile() {
        let (store, book) = book().await;
        book.save_profile("a", config("one"), vec![]).await.unwrap();

        assert!(!book.delete_profile("missing").await.unwrap());
        assert!(book.delete_profile("a").await.unwrap());
        assert!(store.saved().is_empty());
        assert!(book.find("a").is_none());
    }

    #[tokio::test]
    async fn test_remember_collection_without_duplicates() {
        let (store, book) = book().await;
        book.save_profile("a", config("one"), vec![]).await.unwrap();

        book.remember_collection("a", "users").await.unwrap();
        book.remember_collection("a", "orders").await.unwrap();
        let profile = book.remember_collection("a", "users").await.unwrap();

        assert_eq!(profile.collections, vec!["users", "orders"]);
        assert_eq!(store.saved()[0].collections, vec!["users", "orders"]);
    }

    #[tokio::test]
    async fn test_remember_collection_unknown_profile() {
        let (_, book) = book().await;
        assert!(matches!(
            book.remember_collection("ghost", "users").await,
            Err(FirelensError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_open_loads_existing_profiles() {
        let store = Arc::new(MemoryProfileStore::with_profiles(vec![Profile::new(
            "saved",
            config("p"),
        )]));
        let book = ProfileBook::open(store).await.unwrap();
        assert_eq!(book.find("saved").map(|p| p.config.project_id), Some("p".into()));
    }

    struct FailingStore;

    #[async_trait]
    impl ProfileStore for FailingStore {
        async fn load_profiles(&self) -> Result<Vec<Profile>> {
            Ok(Vec::new())
        }

        async fn save_profiles(&self, _profiles: &[Profile]) -> Result<()> {
            Err(FirelensError::Io(std::io::Error::other("disk full")))
        }
    }

    #[tokio::test]
    async fn test_failed_save_leaves_book_unchanged() {
        let book = ProfileBook::open(Arc::new(FailingStore)).await.unwrap();
        assert!(book.save_profile("a", config("one"), vec![]).await.is_err());
        assert!(book.profiles().is_empty());
    }
}
