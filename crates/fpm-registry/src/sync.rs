//! Full registry sync.
//!
//! Sync is sequential and all-or-nothing: every origin is walked in manifest
//! order, every document is fetched one after the other, and the resulting
//! cache is only written once the whole walk has succeeded. A failure or an
//! interrupt anywhere leaves the previous cache file untouched.

use fpm_meta::{ModuleInfo, Project, RequireDescriptor};

use crate::cache::{ModuleCache, ModuleCacheEntry, qualified_name};
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::origin::{OriginMap, document_url};

/// Build a fresh cache from `origins`.
///
/// A missing `map.json` aborts the sync with [`Error::FetchFailure`]. A
/// missing `info.json` or `require.json` does not: the entry is recorded
/// with empty metadata or a `null` descriptor respectively.
///
/// # Errors
///
/// [`Error::FetchFailure`], [`Error::MalformedDocument`] or
/// [`Error::Interrupted`]; any of them discards everything fetched so far.
pub fn sync(origins: &[String], fetcher: &Fetcher) -> Result<ModuleCache> {
    let mut cache = ModuleCache::new();

    for origin in origins {
        let map_url = document_url(origin, "map.json");
        let map: OriginMap = fetcher
            .fetch_json(&map_url)?
            .ok_or_else(|| Error::FetchFailure {
                url: map_url.clone(),
                attempts: fetcher.attempts(),
            })?;
        tracing::info!(origin = %origin, name = %map.name, modules = map.modules.len(), "fetched origin map");

        for module in &map.modules {
            let info_url = document_url(origin, &format!("{module}/info.json"));
            let info: ModuleInfo = fetcher.fetch_json(&info_url)?.unwrap_or_else(|| {
                tracing::warn!(url = %info_url, "module info unavailable, entry will be incomplete");
                ModuleInfo::default()
            });

            let require_url = document_url(origin, &format!("{module}/require.json"));
            let require: Option<RequireDescriptor> = fetcher.fetch_json(&require_url)?;
            if require.is_none() {
                tracing::warn!(url = %require_url, "module require descriptor unavailable");
            }

            cache.insert(
                qualified_name(module, &map.name),
                ModuleCacheEntry {
                    info,
                    download: document_url(origin, &format!("{module}/file.zip")),
                    require,
                },
            );
        }
    }

    Ok(cache)
}

/// Sync the project's trusted origins and replace its cache file.
pub fn sync_project(project: &Project, fetcher: &Fetcher) -> Result<ModuleCache> {
    let manifest = project.manifest_store().load()?;
    let cache = sync(&manifest.origins, fetcher)?;
    cache.save(project)?;
    tracing::info!(
        origins = manifest.origins.len(),
        modules = cache.len(),
        "registry sync complete"
    );
    Ok(cache)
}
