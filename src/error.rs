//! Error types for inventory operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while inventorying a root.
///
/// `RootNotFound`, `OutputExists` and `Write` end the current report (or root).
/// The rest are per-file and get logged and skipped by the callers.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Root path does not exist or is not a directory.
    #[error("{path} is not a directory")]
    RootNotFound { path: PathBuf },

    /// Output file exists and the user declined to delete it.
    #[error("{path} exists")]
    OutputExists { path: PathBuf },

    /// A file could not be opened or read.
    #[error("Error reading {path}: {source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external metadata extractor failed for a file.
    #[error("Error parsing {path}: {message}")]
    MetadataExtraction { path: PathBuf, message: String },

    /// Permission denied while listing or reading a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// A report could not be written.
    #[error("Error writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InventoryError {
    /// Create a read error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::FileUnreadable { path, source },
        }
    }

    /// Create a write error with path context.
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Whether this error only affects a single file and the run can continue.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileUnreadable { .. }
                | Self::MetadataExtraction { .. }
                | Self::PermissionDenied { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
