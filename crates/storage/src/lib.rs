#![forbid(unsafe_code)]

pub mod cache;
pub mod loader;
pub mod repository;
pub mod source;

pub use cache::{LoadedTable, TableCache};
pub use loader::{LoadError, SpreadsheetLoader, StaticTableLoader, TableLoader};
pub use repository::{InMemorySessionStore, SessionRepository, Storage, StorageError};
pub use source::{SourceKey, TableSource};
