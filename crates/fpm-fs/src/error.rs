//! Error types for fpm-fs

use std::path::PathBuf;

/// Result type for fpm-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fpm-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON document at {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize JSON document for {path}: {message}")]
    Serialize { path: PathBuf, message: String },

    #[error("Archive error at {path}: {message}")]
    Archive { path: PathBuf, message: String },

    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn archive(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Archive {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
