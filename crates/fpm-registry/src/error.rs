//! Registry error types.

/// Errors that can occur while talking to origins or reading the cache.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document stayed unavailable after every attempt.
    #[error("failed to fetch {url} after {attempts} attempt(s)")]
    FetchFailure { url: String, attempts: u32 },

    /// The user cancelled while a fetch was in progress.
    #[error("interrupted by user")]
    Interrupted,

    /// An origin served a document that does not decode.
    #[error("malformed document at {url}: {message}")]
    MalformedDocument { url: String, message: String },

    /// The HTTP client could not be constructed.
    #[error("failed to initialise HTTP client: {0}")]
    HttpClient(String),

    #[error(transparent)]
    Meta(#[from] fpm_meta::Error),

    #[error(transparent)]
    Fs(#[from] fpm_fs::Error),
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, Error>;
