//! Document transports.
//!
//! The `Transport` trait abstracts how a single document is retrieved.
//! [`OriginTransport`] is what the CLI uses: HTTP(S) URLs go through a
//! blocking `reqwest` client, `file://` URLs and bare paths are read from
//! the local filesystem so a `maker_release/` directory can be used as an
//! origin before it is uploaded anywhere.

use std::path::Path;

use reqwest::blocking::Client;
use reqwest::header::{CACHE_CONTROL, PRAGMA};

use crate::error::{Error, Result};

/// Failure of a single retrieval attempt. Every variant is retryable.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Request(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

/// Retrieves the raw bytes behind a URL.
pub trait Transport {
    /// Perform one attempt to fetch `url`.
    fn get(&self, url: &str) -> std::result::Result<Vec<u8>, TransportError>;
}

/// Blocking HTTP transport.
///
/// Sends the client identification header and disables intermediary
/// caching. No request timeout is applied.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> std::result::Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache")
            .send()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(body.to_vec())
    }
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTransport;

impl FileTransport {
    /// Filesystem path for a `file://` URL or bare path.
    fn local_path(url: &str) -> &Path {
        Path::new(url.strip_prefix("file://").unwrap_or(url))
    }
}

impl Transport for FileTransport {
    fn get(&self, url: &str) -> std::result::Result<Vec<u8>, TransportError> {
        Ok(std::fs::read(Self::local_path(url))?)
    }
}

/// Dispatches on the URL scheme.
#[derive(Debug, Clone)]
pub struct OriginTransport {
    http: HttpTransport,
    file: FileTransport,
}

impl OriginTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        Ok(Self {
            http: HttpTransport::new(user_agent)?,
            file: FileTransport,
        })
    }
}

impl Transport for OriginTransport {
    fn get(&self, url: &str) -> std::result::Result<Vec<u8>, TransportError> {
        if url.starts_with("http://") || url.starts_with("https://") {
            self.http.get(url)
        } else if url.starts_with("file://") || !url.contains("://") {
            self.file.get(url)
        } else {
            Err(TransportError::UnsupportedScheme(url.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_transport_reads_plain_and_file_urls() {
        let temp = TempDir::new().unwrap();
        let doc = temp.path().join("map.json");
        std::fs::write(&doc, b"{}").unwrap();
        let plain = doc.to_string_lossy().into_owned();

        assert_eq!(FileTransport.get(&plain).unwrap(), b"{}");
        assert_eq!(FileTransport.get(&format!("file://{plain}")).unwrap(), b"{}");
    }

    #[test]
    fn file_transport_missing_file_is_io_error() {
        let err = FileTransport.get("/definitely/not/here/map.json").unwrap_err();
        assert!(matches!(err, TransportError::Io(_)));
    }

    #[test]
    fn origin_transport_rejects_unknown_scheme() {
        let transport = OriginTransport::new("test-agent").unwrap();
        let err = transport.get("ftp://origin.example/map.json").unwrap_err();
        assert!(matches!(err, TransportError::UnsupportedScheme(_)));
    }
}
