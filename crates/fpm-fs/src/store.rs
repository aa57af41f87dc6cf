//! JSON document loading and saving

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// JSON document store.
///
/// Every persistent file the package manager owns (`framerpkg.json`,
/// `origin-cache.json`, `origin-maker.json`, module descriptors) goes
/// through this type so that parsing errors carry the offending path and
/// writes are always atomic.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonStore;

impl JsonStore {
    /// Create a new JsonStore.
    pub fn new() -> Self {
        Self
    }

    /// Load a document from a file.
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text(path)?;
        Self::parse(path, &content)
    }

    /// Load a document, returning `None` when the file does not exist.
    pub fn load_optional<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<Option<T>> {
        match io::read_optional(path)? {
            Some(content) => Self::parse(path, &content).map(Some),
            None => Ok(None),
        }
    }

    /// Load a document, falling back to `T::default()` when absent.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, path: &NormalizedPath) -> Result<T> {
        Ok(self.load_optional(path)?.unwrap_or_default())
    }

    /// Save a document as pretty-printed JSON.
    ///
    /// Uses atomic write to prevent corruption.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let content = Self::render(path, value)?;
        io::write_atomic(path, content.as_bytes())
    }

    /// Render a document exactly as [`save`](Self::save) would write it.
    pub fn render<T: Serialize>(path: &NormalizedPath, value: &T) -> Result<String> {
        let mut content = serde_json::to_string_pretty(value).map_err(|e| Error::Serialize {
            path: path.to_native(),
            message: e.to_string(),
        })?;
        content.push('\n');
        Ok(content)
    }

    fn parse<T: DeserializeOwned>(path: &NormalizedPath, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(|e| Error::Parse {
            path: path.to_native(),
            message: e.to_string(),
        })
    }
}
