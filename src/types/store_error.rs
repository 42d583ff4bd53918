use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize dataset: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to connect to sheet store: {0}")]
    Connection(String),
    #[error("database schema version mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: i64, found: i64 },
    #[error("worksheet '{0}' not found")]
    WorksheetMissing(String),
    #[error("sheet error: {0}")]
    Sheet(#[from] rusqlite::Error),
    #[error("could not write to the sheet: {0}")]
    RemoteWrite(String),
    #[error("{backend} backend does not support {operation}")]
    Unsupported {
        backend: &'static str,
        operation: &'static str,
    },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Rejects empty or whitespace-only input before any storage access.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StoreError::EmptyField(field));
    }
    Ok(())
}
