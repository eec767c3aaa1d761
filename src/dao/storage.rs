use std::{io, path::PathBuf};
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by storage backends regardless of the underlying medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No document is stored for the match.
    #[error("match `{match_id}` not found")]
    NotFound { match_id: String },
    /// A match id or file name is not a single plain path component.
    #[error("invalid storage name `{name}`")]
    InvalidName { name: String },
    /// Reading, writing or deleting a path failed.
    #[error("storage I/O failed on `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The stored document could not be encoded or decoded.
    #[error("corrupt match document `{}`", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Wrap an I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}
