//! Error types for fpm-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] fpm_fs::Error),

    #[error("Malformed manifest at {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    #[error("Module '{module}' has no {file}")]
    MissingDescriptor { module: String, file: String },

    #[error("Module not installed: {name}")]
    NotInstalled { name: String },
}
