//! Error types for fpm-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from fpm-core
    #[error(transparent)]
    Core(#[from] fpm_core::Error),

    /// Error from fpm-registry
    #[error(transparent)]
    Registry(#[from] fpm_registry::Error),

    /// Error from fpm-meta
    #[error(transparent)]
    Meta(#[from] fpm_meta::Error),

    /// Interactive prompt error
    #[error("Interactive prompt error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
