//! Merged module cache (`origin-cache.json`).
//!
//! The cache is a snapshot produced by one sync. It is never patched: the
//! next successful sync replaces it whole. Entries keep the order they were
//! inserted in (origin order, then each origin's module order), both in
//! memory and across a save/load round trip, because search results are
//! reported in that order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use fpm_fs::{JsonStore, ProjectPath};
use fpm_meta::{ModuleInfo, Project, RequireDescriptor};

use crate::error::Result;

/// Build the qualified name `module@origin`.
pub fn qualified_name(module: &str, origin: &str) -> String {
    format!("{module}@{origin}")
}

/// Split a module reference at its first `@` into name and origin part.
pub fn split_reference(reference: &str) -> (&str, Option<&str>) {
    match reference.split_once('@') {
        Some((name, origin)) => (name, Some(origin)),
        None => (reference, None),
    }
}

/// Local (unqualified) module name of a reference.
pub fn local_name(reference: &str) -> &str {
    split_reference(reference).0
}

/// One module as offered by one origin.
///
/// Serialized flat: the metadata fields sit next to `download` and
/// `require`. `require` is `None` when the origin did not serve a
/// descriptor during sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleCacheEntry {
    #[serde(flatten)]
    pub info: ModuleInfo,
    /// URL of the packaged module tree
    pub download: String,
    #[serde(default)]
    pub require: Option<RequireDescriptor>,
}

impl ModuleCacheEntry {
    /// Hard dependencies declared by this entry.
    pub fn dependencies(&self) -> &[String] {
        self.require
            .as_ref()
            .map(|r| r.dependencies.as_slice())
            .unwrap_or_default()
    }
}

/// Insertion-ordered mapping of qualified name to entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleCache {
    entries: Vec<(String, ModuleCacheEntry)>,
}

impl ModuleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. An existing key keeps its position and takes the
    /// new value.
    pub fn insert(&mut self, key: String, entry: ModuleCacheEntry) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((key, entry)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ModuleCacheEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleCacheEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load the project's cache. `None` if no sync has been run yet.
    pub fn load(project: &Project) -> Result<Option<Self>> {
        Ok(JsonStore::new().load_optional(&project.path(ProjectPath::OriginCache))?)
    }

    /// Replace the project's cache file with this snapshot.
    pub fn save(&self, project: &Project) -> Result<()> {
        Ok(JsonStore::new().save(&project.path(ProjectPath::OriginCache), self)?)
    }
}

impl Serialize for ModuleCache {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, e)| (k, e)))
    }
}

impl<'de> Deserialize<'de> for ModuleCache {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CacheVisitor;

        impl<'de> Visitor<'de> for CacheVisitor {
            type Value = ModuleCache;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of qualified module names to cache entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut cache = ModuleCache::new();
                while let Some((key, entry)) = map.next_entry::<String, ModuleCacheEntry>()? {
                    cache.insert(key, entry);
                }
                Ok(cache)
            }
        }

        deserializer.deserialize_map(CacheVisitor)
    }
}
