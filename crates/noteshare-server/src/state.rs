//! Application state shared across handlers.

use std::sync::Arc;

use noteshare_store::AccessControlledNoteStore;

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// Access-controlled note store.
    notes: Arc<AccessControlledNoteStore>,
    /// Server configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new application state.
    pub fn new(notes: AccessControlledNoteStore, config: ServerConfig) -> Self {
        Self {
            notes: Arc::new(notes),
            config: Arc::new(config),
        }
    }

    /// Get a reference to the note store.
    pub fn notes(&self) -> &AccessControlledNoteStore {
        &self.notes
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("notes", &self.notes)
            .field("config", &self.config)
            .finish()
    }
}
