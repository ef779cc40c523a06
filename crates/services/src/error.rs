//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use storage::{LoadError, StorageError};

/// Errors emitted by `PracticeService`.
///
/// `Display` is the message shown to the user; none of these are fatal, the
/// user can retry or upload another file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PracticeError {
    #[error("File '{}' not found. Please check the file path.", .0.display())]
    NotFound(PathBuf),
    #[error("Error loading file: {0}")]
    Decode(String),
    #[error("No sentences found in this file.")]
    EmptyTable,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PracticeError {
    /// The text shown to the user for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Follow-up advice shown under the message, if any.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            PracticeError::NotFound(_) => Some(
                "Please make sure the spreadsheet is in the working directory, or upload it below.",
            ),
            PracticeError::Decode(_) => Some("Check that the file is an Excel workbook (.xlsx or .xls)."),
            PracticeError::EmptyTable | PracticeError::Storage(_) => None,
        }
    }

    /// True if the user should be offered the upload fallback.
    #[must_use]
    pub fn offers_upload(&self) -> bool {
        matches!(self, PracticeError::NotFound(_) | PracticeError::Decode(_))
    }
}

impl From<LoadError> for PracticeError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::NotFound(path) => PracticeError::NotFound(path),
            LoadError::Decode(message) => PracticeError::Decode(message),
            other => PracticeError::Decode(other.to_string()),
        }
    }
}
