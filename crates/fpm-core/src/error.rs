//! Error types for fpm-core

/// Result type for fpm-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while installing or publishing modules
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A top-level reference matched nothing in the registry cache
    #[error("No module matches '{reference}'")]
    NotFound { reference: String },

    /// A dependency resolved to a module that is already being installed
    #[error("Dependency cycle: {}", chain.join(" -> "))]
    DependencyCycle { chain: Vec<String> },

    /// The user aborted a prompt
    #[error("interrupted by user")]
    Interrupted,

    /// A disambiguation prompt could not be shown or answered
    #[error("Prompt failed: {message}")]
    Prompt { message: String },

    // Transparent wrappers for underlying crate errors
    /// Registry error from fpm-registry
    #[error(transparent)]
    Registry(#[from] fpm_registry::Error),

    /// Metadata error from fpm-meta
    #[error(transparent)]
    Meta(#[from] fpm_meta::Error),

    /// Filesystem error from fpm-fs
    #[error(transparent)]
    Fs(#[from] fpm_fs::Error),
}

impl Error {
    /// True for cancellation, whether it came from a prompt or a fetch.
    pub fn is_interrupted(&self) -> bool {
        matches!(
            self,
            Error::Interrupted | Error::Registry(fpm_registry::Error::Interrupted)
        )
    }
}
