//! Session state: profiles, the active connection and opened collections
//!
//! [`SessionState::reduce`] is pure. Effects (persisting profiles, connecting,
//! loading a collection) run in the services and report back as actions.

use firelens_connection::Profile;

/// Where the active profile's connection stands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    /// The last attempt failed with this message
    Failed(String),
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// The saved profile list was read at startup
    ProfilesLoaded(Vec<Profile>),
    /// A profile was persisted; replaces a profile with the same name
    ProfileSaved(Profile),
    ProfileDeleted(String),
    /// The user picked a profile to connect with
    ProfileActivated(String),
    Connected,
    ConnectionFailed(String),
    /// A collection finished loading and is now the selected one
    CollectionLoaded(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub profiles: Vec<Profile>,
    pub active_profile: Option<String>,
    pub status: ConnectionStatus,
    pub selected_collection: Option<String>,
    /// Collections opened this session, in first-opened order
    pub loaded_collections: Vec<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&Profile> {
        let name = self.active_profile.as_deref()?;
        self.profiles.iter().find(|p| p.name == name)
    }

    pub fn reduce(mut self, action: SessionAction) -> Self {
        match action {
            SessionAction::ProfilesLoaded(profiles) => {
                self.profiles = profiles;
                if self.active().is_none() {
                    self.disconnect();
                }
            }
            SessionAction::ProfileSaved(profile) => {
                match self.profiles.iter_mut().find(|p| p.name == profile.name) {
                    Some(existing) => *existing = profile,
                    None => self.profiles.push(profile),
                }
            }
            SessionAction::ProfileDeleted(name) => {
                self.profiles.retain(|p| p.name != name);
                if self.active_profile.as_deref() == Some(name.as_str()) {
                    tracing::info!(profile = %name, "active profile deleted, disconnecting");
                    self.disconnect();
                }
            }
            SessionAction::ProfileActivated(name) => {
                let Some(profile) = self.profiles.iter().find(|p| p.name == name) else {
                    tracing::warn!(profile = %name, "activating unknown profile");
                    return self;
                };
                self.loaded_collections = profile.collections.clone();
                self.active_profile = Some(name);
                self.selected_collection = None;
                self.status = ConnectionStatus::Connecting;
            }
            SessionAction::Connected => {
                if self.active_profile.is_some() {
                    self.status = ConnectionStatus::Connected;
                }
            }
            SessionAction::ConnectionFailed(message) => {
                self.status = ConnectionStatus::Failed(message);
            }
            SessionAction::CollectionLoaded(collection) => {
                if !self.loaded_collections.contains(&collection) {
                    self.loaded_collections.push(collection.clone());
                }
                self.selected_collection = Some(collection);
            }
        }
        self
    }

    fn disconnect(&mut self) {
        self.active_profile = None;
        self.status = ConnectionStatus::Disconnected;
        self.selected_collection = None;
        self.loaded_collections.clear();
    }
}
