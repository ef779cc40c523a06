use std::sync::Arc;

use practice_core::model::{SessionId, SessionState};
use storage::{LoadedTable, SessionRepository, Storage, TableCache, TableSource};

use crate::error::PracticeError;
use crate::sampler::Sampler;
use crate::view::{PracticeCard, PracticeStats, TableInfo};

/// Drives one practice interaction: load a table, draw a row, count it,
/// hand back what to display.
///
/// Session state is loaded at the start of each call and saved at the end,
/// so every call is one self-contained request/response cycle.
#[derive(Clone)]
pub struct PracticeService {
    tables: Arc<TableCache>,
    sessions: Arc<dyn SessionRepository>,
    sampler: Sampler,
}

impl PracticeService {
    #[must_use]
    pub fn new(tables: Arc<TableCache>, sessions: Arc<dyn SessionRepository>) -> Self {
        Self {
            tables,
            sessions,
            sampler: Sampler::Random,
        }
    }

    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(Arc::clone(&storage.tables), Arc::clone(&storage.sessions))
    }

    #[must_use]
    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Load (or reuse) the table behind `source`.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::NotFound` or `PracticeError::Decode`.
    pub fn load_table(&self, source: &TableSource) -> Result<LoadedTable, PracticeError> {
        Ok(self.tables.load(source)?)
    }

    #[must_use]
    pub fn table_info(&self, loaded: &LoadedTable) -> TableInfo {
        TableInfo::new(loaded)
    }

    /// Draw a random row for the session, show it and count it once.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::EmptyTable` if the table has no rows, or
    /// `PracticeError::Storage` if the session cannot be read or written.
    pub async fn draw(
        &self,
        session: SessionId,
        loaded: &LoadedTable,
    ) -> Result<PracticeCard, PracticeError> {
        let table = &loaded.table;
        let Some(index) = self.sampler.draw(table.row_count()) else {
            return Err(PracticeError::EmptyTable);
        };

        let mut state = self.sessions.load_session(session).await?;
        if state.bind_table(&loaded.fingerprint()) {
            tracing::debug!(event = "session_rebound", session = %session, source = %loaded.label());
        }
        let first_time = state.select(index);
        self.sessions.save_session(session, &state).await?;

        tracing::info!(
            event = "sentence_drawn",
            session = %session,
            index,
            first_time,
            practice_count = state.coverage().practice_count(),
        );

        PracticeCard::from_table(table, index).ok_or(PracticeError::EmptyTable)
    }

    /// The row currently shown for the session, without counting it again.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Storage` if the session cannot be read.
    pub async fn current(
        &self,
        session: SessionId,
        loaded: &LoadedTable,
    ) -> Result<Option<PracticeCard>, PracticeError> {
        let state = self.state_for(session, loaded).await?;
        Ok(state
            .visible_index()
            .and_then(|index| PracticeCard::from_table(&loaded.table, index)))
    }

    /// Practice counter and coverage for the session on this table.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Storage` if the session cannot be read.
    pub async fn stats(
        &self,
        session: SessionId,
        loaded: &LoadedTable,
    ) -> Result<PracticeStats, PracticeError> {
        let state = self.state_for(session, loaded).await?;
        Ok(PracticeStats::new(state.coverage(), loaded.table.row_count()))
    }

    /// Forget everything about the session.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Storage` if the store cannot be written.
    pub async fn end_session(&self, session: SessionId) -> Result<bool, PracticeError> {
        let ended = self.sessions.end_session(session).await?;
        tracing::debug!(event = "session_ended", session = %session, ended);
        Ok(ended)
    }

    // State as it applies to `loaded`; counters for another table read as fresh.
    async fn state_for(
        &self,
        session: SessionId,
        loaded: &LoadedTable,
    ) -> Result<SessionState, PracticeError> {
        let state = self.sessions.load_session(session).await?;
        let fingerprint = loaded.fingerprint();
        match state.table_fingerprint() {
            Some(bound) if bound != fingerprint => Ok(SessionState::default()),
            _ => Ok(state),
        }
    }
}
