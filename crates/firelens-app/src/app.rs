//! Application state shared by the UI
//!
//! Holds the loaded settings, the saved profiles and the services, and
//! performs the effects behind the session actions.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use firelens_connection::{JsonFileProfileStore, ProfileBook, ProfileStore};
use firelens_core::{DocumentStore, FirebaseConfig};
use firelens_drivers::DriverRegistry;
use firelens_drivers::firestore::{FirestoreDriver, FirestoreOptions};
use firelens_interchange::{ExportFormat, ExportMode, ExportOptions};
use firelens_services::{ConnectionService, DocumentService};
use firelens_settings::{ExportSettings, FirelensSettings, FirestoreSettings};
use firelens_table::{TableAction, TableState};

use crate::{SessionAction, SessionState};

/// Driver used for saved profiles
pub const DEFAULT_DRIVER: &str = "firestore";

/// REST client options from the user's Firestore settings
pub fn firestore_options(settings: &FirestoreSettings) -> FirestoreOptions {
    FirestoreOptions {
        base_url: settings.base_url.trim_end_matches('/').to_string(),
        database_id: settings.database_id.clone(),
        page_size: settings.page_size,
    }
}

/// Export options honoring the user's pretty-print preference
pub fn export_options(settings: &ExportSettings, format: ExportFormat, mode: ExportMode) -> ExportOptions {
    ExportOptions {
        format,
        mode,
        pretty: settings.pretty,
    }
}

pub struct AppState {
    pub settings: FirelensSettings,
    pub profiles: ProfileBook,
    pub connection_service: Arc<ConnectionService>,
}

impl AppState {
    /// Load settings and profiles from their default locations
    pub async fn load() -> Result<Self> {
        firelens_settings::ensure_directories()?;
        Self::load_from(&FirelensSettings::settings_path()?).await
    }

    /// Load settings from `settings_path` and profiles from the file they name
    pub async fn load_from(settings_path: &Path) -> Result<Self> {
        let settings = FirelensSettings::load_from(settings_path)?;
        let path = settings.profiles_path()?;
        tracing::info!(profiles = %path.display(), "loading profiles");
        Self::open(settings, Arc::new(JsonFileProfileStore::new(path))).await
    }

    pub async fn open(settings: FirelensSettings, store: Arc<dyn ProfileStore>) -> Result<Self> {
        let profiles = ProfileBook::open(store)
            .await
            .context("Failed to load saved profiles")?;

        let mut registry = DriverRegistry::with_defaults();
        registry.register(Arc::new(FirestoreDriver::with_options(firestore_options(
            &settings.firestore,
        ))));

        Ok(Self {
            settings,
            profiles,
            connection_service: Arc::new(ConnectionService::with_registry(registry)),
        })
    }

    /// The session as it stands at startup
    pub fn initial_session(&self) -> SessionState {
        SessionState::new().reduce(SessionAction::ProfilesLoaded(self.profiles.profiles()))
    }

    /// Connect with a saved profile.
    ///
    /// Returns the updated session and, on success, a service over the new
    /// store. A failed attempt is recorded in the session, not returned.
    #[tracing::instrument(skip(self, session))]
    pub async fn activate_profile(
        &self,
        session: SessionState,
        name: &str,
        driver: &str,
    ) -> (SessionState, Option<DocumentService>) {
        let session = session.reduce(SessionAction::ProfileActivated(name.to_string()));
        let Some(profile) = session.active().cloned() else {
            return (session, None);
        };

        match self.connection_service.connect(driver, &profile.config).await {
            Ok(store) => (
                session.reduce(SessionAction::Connected),
                Some(self.document_service(store)),
            ),
            Err(e) => {
                let message = e.notification().message;
                (session.reduce(SessionAction::ConnectionFailed(message)), None)
            }
        }
    }

    /// Load a collection into the table and record it on the active profile.
    ///
    /// A failed load leaves both the table and the session as they were, apart
    /// from the started generation.
    pub async fn open_collection(
        &self,
        service: &DocumentService,
        session: SessionState,
        mut table: TableState,
        collection: &str,
    ) -> Result<(SessionState, TableState)> {
        let generation = table.begin_load();
        let snapshot = match service.load_collection(collection).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(collection = %collection, error = %e, "collection load failed");
                return Err(anyhow::anyhow!(e.notification().message));
            }
        };

        let table = table.reduce(TableAction::SnapshotLoaded {
            generation,
            snapshot,
        });
        let session = self.collection_loaded(session, collection).await?;
        Ok((session, table))
    }

    /// Record a loaded collection on the active profile and in the session
    pub async fn collection_loaded(&self, session: SessionState, collection: &str) -> Result<SessionState> {
        let mut session = session.reduce(SessionAction::CollectionLoaded(collection.to_string()));
        if let Some(name) = session.active_profile.clone() {
            let profile = self.profiles.remember_collection(&name, collection).await?;
            session = session.reduce(SessionAction::ProfileSaved(profile));
        }
        Ok(session)
    }

    /// Persist a profile and reflect it in the session
    pub async fn save_profile(
        &self,
        session: SessionState,
        name: &str,
        config: FirebaseConfig,
    ) -> Result<SessionState> {
        let collections = self
            .profiles
            .find(name.trim())
            .map(|p| p.collections)
            .unwrap_or_default();
        let profile = self.profiles.save_profile(name, config, collections).await?;
        Ok(session.reduce(SessionAction::ProfileSaved(profile)))
    }

    pub async fn delete_profile(&self, session: SessionState, name: &str) -> Result<SessionState> {
        if !self.profiles.delete_profile(name).await? {
            return Ok(session);
        }
        Ok(session.reduce(SessionAction::ProfileDeleted(name.to_string())))
    }

    pub fn document_service(&self, store: Arc<dyn DocumentStore>) -> DocumentService {
        DocumentService::new(store)
    }

    pub fn export_dir(&self) -> Result<PathBuf> {
        self.settings.export_dir()
    }
}
