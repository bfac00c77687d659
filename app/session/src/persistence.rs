//! Save and load a [`Session`] and its message history as a JSON file.
//!
//! The message history is persisted in its flattened wire form (the same
//! view sent to the model) rather than the in-memory `Turn` structure,
//! since `Turn` carries a monotonic `Instant` that has no meaningful
//! on-disk representation. Loading replays that flattened list back into
//! turns: a user message opens a turn, the assistant message that follows
//! it closes it.

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use snafu::Location;
use snafu::ResultExt;
use snafu::Snafu;
use turnkit_error::ErrorExt;
use turnkit_error::StatusCode;
use turnkit_error::stack_trace_debug;
use turnkit_message::MessageHistory;
use turnkit_message::MessageSource;
use turnkit_message::TrackedMessage;
use turnkit_message::Turn;
use turnkit_provider::Message;
use turnkit_provider::Role;

use crate::session::Session;

const PERSISTED_SESSION_VERSION: i32 = 1;
const SESSIONS_DIR: &str = "sessions";

#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum PersistenceError {
    #[snafu(display("failed to read session file {path}", path = path.display()))]
    Read {
        path: PathBuf,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to write session file {path}", path = path.display()))]
    Write {
        path: PathBuf,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to delete session file {path}", path = path.display()))]
    Delete {
        path: PathBuf,
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to parse session file {path}", path = path.display()))]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to serialize session"))]
    Serialize {
        source: serde_json::Error,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for PersistenceError {
    fn status_code(&self) -> StatusCode {
        match self {
            PersistenceError::Read { .. } => StatusCode::IoError,
            PersistenceError::Write { .. } => StatusCode::IoError,
            PersistenceError::Delete { .. } => StatusCode::IoError,
            PersistenceError::Parse { .. } => StatusCode::InvalidArguments,
            PersistenceError::Serialize { .. } => StatusCode::Internal,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// On-disk representation of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedSession {
    pub version: i32,
    pub session: Session,
    pub messages: Vec<Message>,
}

impl PersistedSession {
    pub fn new(session: Session, history: MessageHistory) -> Self {
        Self {
            version: PERSISTED_SESSION_VERSION,
            session,
            messages: history.messages_for_api(),
        }
    }

    /// Replay the flattened message list back into a [`MessageHistory`].
    ///
    /// Any leading system message is dropped; the system prompt is rebuilt
    /// from the live environment at session resume time, not replayed.
    pub fn into_parts(self) -> (Session, MessageHistory) {
        let mut history = MessageHistory::new();
        let mut turn_number = 0;
        let mut pending: Option<Turn> = None;

        for message in self.messages {
            match message.role {
                Role::System => continue,
                Role::Assistant => {
                    if let Some(turn) = pending.as_mut() {
                        let turn_id = turn.user_message.turn_id.clone();
                        turn.set_assistant_message(TrackedMessage::new(
                            message,
                            turn_id,
                            MessageSource::assistant(None),
                        ));
                    }
                }
                Role::User | Role::Tool => {
                    if let Some(turn) = pending.take() {
                        history.add_turn(turn);
                    }
                    turn_number += 1;
                    let turn_id = turn_number.to_string();
                    let tracked = TrackedMessage::new(message, turn_id, MessageSource::User);
                    pending = Some(Turn::new(turn_number, tracked));
                }
            }
        }
        if let Some(turn) = pending.take() {
            history.add_turn(turn);
        }

        (self.session, history)
    }
}

/// Default on-disk path for a session, under `{turnkit_home}/sessions/{id}.json`.
pub fn session_file_path(id: &str) -> PathBuf {
    turnkit_config::loader::find_turnkit_home()
        .join(SESSIONS_DIR)
        .join(format!("{id}.json"))
}

/// Persist a session and its message history to `path`, creating parent
/// directories as needed.
pub async fn save_session_to_file(
    session: &Session,
    history: &MessageHistory,
    path: &Path,
) -> Result<()> {
    let persisted = PersistedSession::new(session.clone(), history.clone());
    let json = serde_json::to_string_pretty(&persisted).context(persistence_error::SerializeSnafu)?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .context(persistence_error::WriteSnafu { path: path.to_path_buf() })?;
    }

    tokio::fs::write(path, json)
        .await
        .context(persistence_error::WriteSnafu { path: path.to_path_buf() })
}

/// Load a session and its message history from `path`.
pub async fn load_session_from_file(path: &Path) -> Result<(Session, MessageHistory)> {
    let json = tokio::fs::read_to_string(path)
        .await
        .context(persistence_error::ReadSnafu { path: path.to_path_buf() })?;
    let persisted: PersistedSession =
        serde_json::from_str(&json).context(persistence_error::ParseSnafu { path: path.to_path_buf() })?;
    Ok(persisted.into_parts())
}

/// Delete a persisted session file.
pub async fn delete_session_file(path: &Path) -> Result<()> {
    tokio::fs::remove_file(path)
        .await
        .context(persistence_error::DeleteSnafu { path: path.to_path_buf() })
}

/// Check whether a session file exists at `path`.
pub async fn session_exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok()
}

#[cfg(test)]
#[path = "persistence.test.rs"]
mod tests;
