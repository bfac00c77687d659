//! Session lifecycle: metadata, runtime state, model resolution, and persistence.
//!
//! A [`Session`] is lightweight metadata (id, working directory, role
//! selections). A [`SessionState`] wraps a session with its message
//! history and the tool registry needed to actually drive turns through
//! [`turnkit_loop::AgentLoop`]. [`SessionManager`] tracks active sessions
//! in memory and persists them to disk via [`persistence`].

pub mod manager;
pub mod model_registry;
pub mod persistence;
pub mod session;
pub mod state;

pub use manager::SessionManager;
pub use model_registry::ModelRegistry;
pub use model_registry::ModelResolveError;
pub use persistence::PersistedSession;
pub use persistence::PersistenceError;
pub use persistence::delete_session_file;
pub use persistence::load_session_from_file;
pub use persistence::save_session_to_file;
pub use persistence::session_exists;
pub use persistence::session_file_path;
pub use session::Session;
pub use session::SessionBuilder;
pub use state::SessionState;
pub use state::TurnResult;
