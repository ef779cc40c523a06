use async_trait::async_trait;
use practice_core::model::{SessionId, SessionState};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::cache::TableCache;
use crate::loader::{SpreadsheetLoader, TableLoader};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Repository contract for per-session state.
///
/// Each `SessionId` owns its state exclusively; nothing is shared between
/// sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch the state for a session, starting from defaults on first access.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    async fn load_session(&self, id: SessionId) -> Result<SessionState, StorageError>;

    /// Persist the state for a session until it ends.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the state cannot be stored.
    async fn save_session(&self, id: SessionId, state: &SessionState) -> Result<(), StorageError>;

    /// Drop a session's state. Returns `false` if nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    async fn end_session(&self, id: SessionId) -> Result<bool, StorageError>;
}

/// Session state kept in process memory, gone when the process exits.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, SessionState>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Number of sessions with stored state.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the lock is poisoned.
    pub fn active_sessions(&self) -> Result<usize, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(guard.len())
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn load_session(&self, id: SessionId) -> Result<SessionState, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(guard.get(&id).cloned().unwrap_or_default())
    }

    async fn save_session(&self, id: SessionId, state: &SessionState) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        guard.insert(id, state.clone());
        Ok(())
    }

    async fn end_session(&self, id: SessionId) -> Result<bool, StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(guard.remove(&id).is_some())
    }
}

/// Table cache plus session store, wired for one process.
#[derive(Clone)]
pub struct Storage {
    pub tables: Arc<TableCache>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Storage {
    /// Tables from `loader`, sessions in memory.
    #[must_use]
    pub fn with_loader(loader: Arc<dyn TableLoader>) -> Self {
        Self {
            tables: Arc::new(TableCache::new(loader)),
            sessions: Arc::new(InMemorySessionStore::new()),
        }
    }

    /// Spreadsheet files and uploads, sessions in memory.
    #[must_use]
    pub fn spreadsheets() -> Self {
        Self::with_loader(Arc::new(SpreadsheetLoader))
    }
}
