//! The `framerpkg.json` project manifest
//!
//! The manifest records which modules are installed, which are disabled,
//! and which origins are trusted. The module directory tree stays the
//! source of truth for "installed"; `modules` is a derived copy refreshed
//! by an explicit resync.
//!
//! There is no locking. Callers must treat the manifest as single-writer.

use serde::{Deserialize, Serialize};

use fpm_fs::{JsonStore, NormalizedPath};

use crate::error::{Error, Result};

/// In-memory form of `framerpkg.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Installed module names, as of the last resync
    #[serde(default)]
    pub modules: Vec<String>,
    /// Modules the host framework must not load
    #[serde(default)]
    pub disable: Vec<String>,
    /// Trusted origin URLs, in sync order
    #[serde(default)]
    pub origins: Vec<String>,
}

impl Manifest {
    /// Trust an origin. Returns false if it was already present.
    pub fn add_origin(&mut self, url: &str) -> bool {
        insert_unique(&mut self.origins, url)
    }

    /// Stop trusting an origin. Returns false if it was not present.
    pub fn remove_origin(&mut self, url: &str) -> bool {
        remove_value(&mut self.origins, url)
    }

    /// Replace the installed module list.
    pub fn set_modules(&mut self, modules: Vec<String>) {
        self.modules = modules;
    }

    /// Re-enable a module. Returns false if it was not disabled.
    pub fn enable(&mut self, name: &str) -> bool {
        remove_value(&mut self.disable, name)
    }

    /// Disable a module. Returns false if it was already disabled.
    pub fn disable(&mut self, name: &str) -> bool {
        insert_unique(&mut self.disable, name)
    }

    pub fn is_disabled(&self, name: &str) -> bool {
        self.disable.iter().any(|d| d == name)
    }
}

fn insert_unique(list: &mut Vec<String>, value: &str) -> bool {
    if list.iter().any(|v| v == value) {
        return false;
    }
    list.push(value.to_string());
    true
}

fn remove_value(list: &mut Vec<String>, value: &str) -> bool {
    let before = list.len();
    list.retain(|v| v != value);
    list.len() != before
}

/// Loads and saves the manifest of one project.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: NormalizedPath,
    store: JsonStore,
}

impl ManifestStore {
    pub fn new(path: NormalizedPath) -> Self {
        Self {
            path,
            store: JsonStore::new(),
        }
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the manifest, or an empty one if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ManifestParse`] if the file exists but is not a
    /// valid manifest.
    pub fn load(&self) -> Result<Manifest> {
        self.store
            .load_or_default(&self.path)
            .map_err(|e| match e {
                fpm_fs::Error::Parse { path, message } => Error::ManifestParse { path, message },
                other => Error::Fs(other),
            })
    }

    /// Overwrite the whole manifest.
    pub fn save(&self, manifest: &Manifest) -> Result<()> {
        self.store.save(&self.path, manifest)?;
        tracing::debug!(path = %self.path, "saved manifest");
        Ok(())
    }

    /// Write an empty manifest if none exists. Returns whether one was created.
    pub fn init(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }
        self.save(&Manifest::default())?;
        Ok(true)
    }

    /// Load, apply `change`, and save only if `change` reports a modification.
    ///
    /// Returns the value reported by `change`.
    pub fn update(&self, change: impl FnOnce(&mut Manifest) -> bool) -> Result<bool> {
        let mut manifest = self.load()?;
        let changed = change(&mut manifest);
        if changed || !self.exists() {
            self.save(&manifest)?;
        }
        Ok(changed)
    }
}
