use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::loader::LoadError;

/// Where a practice table comes from.
#[derive(Clone)]
pub enum TableSource {
    /// A spreadsheet on disk.
    Path(PathBuf),
    /// Spreadsheet bytes handed over by the user, e.g. through a file picker.
    Upload { name: String, bytes: Arc<[u8]> },
}

impl TableSource {
    #[must_use]
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    #[must_use]
    pub fn upload(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Upload {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Human-readable name: the path for files, the file name for uploads.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            TableSource::Path(path) => path.display().to_string(),
            TableSource::Upload { name, .. } => name.clone(),
        }
    }

    /// Cache identity of this source.
    ///
    /// Files are keyed by path and modification time, uploads by a SHA-256
    /// of their content.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::NotFound` if the path does not exist and
    /// `LoadError::Decode` if its metadata cannot be read.
    pub fn key(&self) -> Result<SourceKey, LoadError> {
        match self {
            TableSource::Path(path) => {
                let metadata = std::fs::metadata(path).map_err(|err| match err.kind() {
                    ErrorKind::NotFound => LoadError::NotFound(path.clone()),
                    _ => LoadError::Decode(err.to_string()),
                })?;
                let modified = metadata.modified().ok().map(DateTime::<Utc>::from);
                Ok(SourceKey::Path {
                    path: path.clone(),
                    modified,
                })
            }
            TableSource::Upload { name, bytes } => Ok(SourceKey::Upload {
                name: name.clone(),
                sha256: hex::encode(Sha256::digest(bytes)),
            }),
        }
    }
}

impl fmt::Debug for TableSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            TableSource::Upload { name, bytes } => f
                .debug_struct("Upload")
                .field("name", name)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

/// Identity a loaded table is cached under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
    Path {
        path: PathBuf,
        modified: Option<DateTime<Utc>>,
    },
    Upload {
        name: String,
        sha256: String,
    },
}

impl SourceKey {
    /// Stable string form, used to tie session counters to a table.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        match self {
            SourceKey::Path { path, modified } => match modified {
                Some(at) => format!("path:{}@{}", path.display(), at.timestamp_millis()),
                None => format!("path:{}", path.display()),
            },
            SourceKey::Upload { sha256, .. } => format!("upload:{sha256}"),
        }
    }

    #[must_use]
    pub fn label(&self) -> String {
        match self {
            SourceKey::Path { path, .. } => path.display().to_string(),
            SourceKey::Upload { name, .. } => name.clone(),
        }
    }

    #[must_use]
    pub fn modified(&self) -> Option<DateTime<Utc>> {
        match self {
            SourceKey::Path { modified, .. } => *modified,
            SourceKey::Upload { .. } => None,
        }
    }

    /// True if both keys name the same file or upload, whatever its version.
    #[must_use]
    pub fn same_origin(&self, other: &SourceKey) -> bool {
        match (self, other) {
            (SourceKey::Path { path: a, .. }, SourceKey::Path { path: b, .. }) => a == b,
            (SourceKey::Upload { name: a, .. }, SourceKey::Upload { name: b, .. }) => a == b,
            _ => false,
        }
    }
}
