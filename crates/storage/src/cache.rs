use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use practice_core::model::Table;

use crate::loader::{LoadError, TableLoader};
use crate::source::{SourceKey, TableSource};

/// A table together with the key it was loaded under.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub key: SourceKey,
    pub table: Arc<Table>,
}

impl LoadedTable {
    #[must_use]
    pub fn fingerprint(&self) -> String {
        self.key.fingerprint()
    }

    #[must_use]
    pub fn label(&self) -> String {
        self.key.label()
    }
}

/// Process-wide cache of decoded tables keyed by `SourceKey`.
///
/// A file is reloaded once its modification time changes; older versions of
/// the same file or upload name are evicted on insert. Load failures are
/// never cached.
pub struct TableCache {
    loader: Arc<dyn TableLoader>,
    entries: Mutex<HashMap<SourceKey, Arc<Table>>>,
}

impl TableCache {
    #[must_use]
    pub fn new(loader: Arc<dyn TableLoader>) -> Self {
        Self {
            loader,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached table for `source`, decoding it on first use.
    ///
    /// # Errors
    ///
    /// Propagates `LoadError` from the loader.
    pub fn load(&self, source: &TableSource) -> Result<LoadedTable, LoadError> {
        let key = self.loader.key(source)?;

        if let Some(table) = self.entries().get(&key) {
            tracing::debug!(event = "table_cache_hit", source = %key.label());
            return Ok(LoadedTable {
                key,
                table: Arc::clone(table),
            });
        }

        let table = match self.loader.load(source) {
            Ok(table) => Arc::new(table),
            Err(err) => {
                tracing::warn!(event = "table_load_failed", source = %key.label(), error = %err);
                return Err(err);
            }
        };
        tracing::info!(
            event = "table_loaded",
            source = %key.label(),
            rows = table.row_count(),
            columns = table.column_count(),
        );

        let mut entries = self.entries();
        entries.retain(|cached, _| !cached.same_origin(&key));
        entries.insert(key.clone(), Arc::clone(&table));
        Ok(LoadedTable { key, table })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    // The map only ever holds complete entries, so a poisoned lock is still usable.
    fn entries(&self) -> MutexGuard<'_, HashMap<SourceKey, Arc<Table>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
