//! Bounded-retry document fetching.
//!
//! Each document is tried up to `attempts` times with no delay between
//! attempts. Running out of attempts is not an error at this level: the
//! fetcher answers `Ok(None)` ("unavailable") and every caller decides what
//! a missing document means for it. Only cancellation and decode failures
//! are reported as errors.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::cancel::CancelFlag;
use crate::error::{Error, Result};
use crate::transport::{OriginTransport, Transport};

/// Attempts per document unless configured otherwise.
pub const DEFAULT_ATTEMPTS: u32 = 3;

/// Client identification sent to HTTP origins.
pub const DEFAULT_USER_AGENT: &str = "Framer-CLI/1.0 (Official)";

/// How documents are fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Attempts per document, at least one
    pub attempts: u32,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Fetches documents through a [`Transport`] with bounded retry.
pub struct Fetcher {
    transport: Box<dyn Transport>,
    attempts: u32,
    cancel: CancelFlag,
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("attempts", &self.attempts)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl Fetcher {
    pub fn new(transport: impl Transport + 'static, attempts: u32, cancel: CancelFlag) -> Self {
        Self {
            transport: Box::new(transport),
            attempts: attempts.max(1),
            cancel,
        }
    }

    /// Fetcher over the scheme-dispatching [`OriginTransport`].
    pub fn from_policy(policy: &FetchPolicy, cancel: CancelFlag) -> Result<Self> {
        let transport = OriginTransport::new(&policy.user_agent)?;
        Ok(Self::new(transport, policy.attempts, cancel))
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    /// Fetch the raw bytes of `url`.
    ///
    /// Returns `Ok(None)` once every attempt has failed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interrupted`] if the cancel flag is raised before or
    /// during the retry loop.
    pub fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>> {
        tracing::debug!(url, "fetch");
        for attempt in 1..=self.attempts {
            self.cancel.check()?;
            match self.transport.get(url) {
                Ok(body) => {
                    tracing::trace!(url, attempt, bytes = body.len(), "fetched");
                    return Ok(Some(body));
                }
                Err(e) => {
                    self.cancel.check()?;
                    tracing::warn!(url, attempt, error = %e, "fetch attempt failed");
                }
            }
        }
        tracing::warn!(url, attempts = self.attempts, "document unavailable");
        Ok(None)
    }

    /// Fetch and decode a JSON document.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedDocument`] if the body does not decode as `T`.
    pub fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        match self.fetch(url)? {
            Some(body) => serde_json::from_slice(&body)
                .map(Some)
                .map_err(|e| Error::MalformedDocument {
                    url: url.to_string(),
                    message: e.to_string(),
                }),
            None => Ok(None),
        }
    }

    /// Fetch `url` into the file at `dest`. Returns false if unavailable.
    pub fn download(&self, url: &str, dest: &Path) -> Result<bool> {
        let Some(body) = self.fetch(url)? else {
            return Ok(false);
        };
        std::fs::write(dest, &body).map_err(|e| fpm_fs::Error::io(dest, e))?;
        tracing::debug!(
            url,
            dest = %dest.display(),
            checksum = %fpm_fs::checksum::compute_bytes_checksum(&body),
            "downloaded"
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Fails a fixed number of times, then serves a body.
    struct Flaky {
        failures: u32,
        calls: Rc<Cell<u32>>,
        body: &'static [u8],
    }

    impl Transport for Flaky {
        fn get(&self, _url: &str) -> std::result::Result<Vec<u8>, TransportError> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            if n <= self.failures {
                Err(TransportError::Status(503))
            } else {
                Ok(self.body.to_vec())
            }
        }
    }

    fn flaky(failures: u32, body: &'static [u8]) -> (Flaky, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        (
            Flaky {
                failures,
                calls: Rc::clone(&calls),
                body,
            },
            calls,
        )
    }

    #[test]
    fn succeeds_within_budget() {
        let (transport, calls) = flaky(2, b"ok");
        let fetcher = Fetcher::new(transport, 3, CancelFlag::new());

        assert_eq!(fetcher.fetch("u").unwrap(), Some(b"ok".to_vec()));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn exhaustion_is_unavailable_not_error() {
        let (transport, calls) = flaky(10, b"ok");
        let fetcher = Fetcher::new(transport, 3, CancelFlag::new());

        assert_eq!(fetcher.fetch("u").unwrap(), None);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let (transport, calls) = flaky(0, b"ok");
        let fetcher = Fetcher::new(transport, 0, CancelFlag::new());

        assert!(fetcher.fetch("u").unwrap().is_some());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn cancelled_flag_stops_before_any_attempt() {
        let (transport, calls) = flaky(0, b"ok");
        let cancel = CancelFlag::new();
        cancel.cancel();
        let fetcher = Fetcher::new(transport, 3, cancel);

        assert!(matches!(fetcher.fetch("u"), Err(Error::Interrupted)));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn undecodable_json_is_malformed() {
        let (transport, _) = flaky(0, b"<html>");
        let fetcher = Fetcher::new(transport, 1, CancelFlag::new());

        let err = fetcher.fetch_json::<serde_json::Value>("https://o/map.json").unwrap_err();
        assert!(
            matches!(err, Error::MalformedDocument { ref url, .. } if url == "https://o/map.json"),
            "got {err:?}"
        );
    }
}
