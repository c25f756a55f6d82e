//! Error types for scope-fs

use std::path::PathBuf;

/// Result type for scope-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating, reading or writing scope files
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Stream I/O error: {0}")]
    Stream(#[from] std::io::Error),

    #[error("Lock acquisition failed for {path}: {source}")]
    LockFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine the home directory")]
    HomeDirNotFound,

    #[error("No {marker} directory found in {start} or any of its parents")]
    RepositoryNotFound { marker: String, start: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The kind of the underlying I/O failure, for I/O errors only.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io { source, .. } | Self::Stream(source) => Some(source.kind()),
            _ => None,
        }
    }

    /// The source does not exist.
    pub fn is_not_found(&self) -> bool {
        self.io_kind() == Some(std::io::ErrorKind::NotFound)
    }

    /// Access to the source was refused by the operating system.
    pub fn is_permission_denied(&self) -> bool {
        self.io_kind() == Some(std::io::ErrorKind::PermissionDenied)
    }
}
