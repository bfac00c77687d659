//! Tracks active sessions in memory and persists them to disk.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::RwLock;

use snafu::ResultExt;
use tokio::sync::Mutex;

use crate::persistence;
use crate::persistence::PersistenceError;
use crate::session::Session;
use crate::state::SessionState;
use turnkit_message::MessageHistory;

const SESSIONS_SUBDIR: &str = "sessions";

/// Registry of in-memory [`SessionState`]s plus the on-disk directory they
/// persist to.
pub struct SessionManager {
    pub storage_dir: PathBuf,
    active: RwLock<HashMap<String, Arc<Mutex<SessionState>>>>,
}

impl SessionManager {
    /// Create a manager using the default storage directory
    /// (`{turnkit_home}/sessions`).
    pub fn new() -> Self {
        Self::with_storage_dir(turnkit_config::loader::find_turnkit_home().join(SESSIONS_SUBDIR))
    }

    /// Create a manager that persists to a specific directory.
    pub fn with_storage_dir(storage_dir: PathBuf) -> Self {
        Self {
            storage_dir,
            active: RwLock::new(HashMap::new()),
        }
    }

    /// Number of sessions currently held in memory.
    pub fn active_count(&self) -> usize {
        self.active.read().expect("session registry lock poisoned").len()
    }

    /// IDs of sessions currently held in memory.
    pub fn list_active(&self) -> Vec<String> {
        self.active
            .read()
            .expect("session registry lock poisoned")
            .keys()
            .cloned()
            .collect()
    }

    /// Register a session as active, returning a shared handle to it.
    pub fn register(&self, state: SessionState) -> Arc<Mutex<SessionState>> {
        let id = state.session_id().to_string();
        let handle = Arc::new(Mutex::new(state));
        self.active
            .write()
            .expect("session registry lock poisoned")
            .insert(id, handle.clone());
        handle
    }

    /// Get a handle to an active session by ID.
    pub fn get(&self, id: &str) -> Option<Arc<Mutex<SessionState>>> {
        self.active
            .read()
            .expect("session registry lock poisoned")
            .get(id)
            .cloned()
    }

    /// Remove a session from the active registry (does not delete it from disk).
    pub fn remove(&self, id: &str) -> Option<Arc<Mutex<SessionState>>> {
        self.active
            .write()
            .expect("session registry lock poisoned")
            .remove(id)
    }

    fn session_path(&self, id: &str) -> PathBuf {
        self.storage_dir.join(format!("{id}.json"))
    }

    /// Persist a session and its message history to disk.
    pub async fn save(
        &self,
        session: &Session,
        history: &MessageHistory,
    ) -> Result<(), PersistenceError> {
        let path = self.session_path(&session.id);
        persistence::save_session_to_file(session, history, &path).await
    }

    /// Load a session and its message history from disk.
    pub async fn load(&self, id: &str) -> Result<(Session, MessageHistory), PersistenceError> {
        let path = self.session_path(id);
        persistence::load_session_from_file(&path).await
    }

    /// Delete a persisted session file.
    pub async fn delete_persisted(&self, id: &str) -> Result<(), PersistenceError> {
        persistence::delete_session_file(&self.session_path(id)).await
    }

    /// List every session persisted under the storage directory.
    ///
    /// Returns an empty list (rather than an error) if the directory does
    /// not exist yet. Files that fail to parse are skipped.
    pub async fn list_persisted(&self) -> Result<Vec<Session>, PersistenceError> {
        let mut entries = match tokio::fs::read_dir(&self.storage_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).context(persistence::persistence_error::ReadSnafu {
                    path: self.storage_dir.clone(),
                });
            }
        };

        let mut sessions = Vec::new();
        while let Some(entry) = entries.next_entry().await.context(
            persistence::persistence_error::ReadSnafu {
                path: self.storage_dir.clone(),
            },
        )? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Ok((session, _)) = persistence::load_session_from_file(&path).await {
                sessions.push(session);
            }
        }
        Ok(sessions)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "manager.test.rs"]
mod tests;
