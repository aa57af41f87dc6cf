//! Per-invocation command context
//!
//! Bundles the project handle with the fetch settings and the cancel flag
//! shared with the interrupt watcher.

use std::path::Path;

use fpm_meta::Project;
use fpm_registry::{CancelFlag, FetchPolicy, Fetcher, ModuleCache};

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Context {
    pub project: Project,
    policy: FetchPolicy,
    cancel: CancelFlag,
}

impl Context {
    pub fn new(root: &Path, attempts: u32, cancel: CancelFlag) -> Self {
        Self {
            project: Project::new(root),
            policy: FetchPolicy {
                attempts,
                ..FetchPolicy::default()
            },
            cancel,
        }
    }

    /// Fetcher over the scheme-dispatching transport.
    pub fn fetcher(&self) -> Result<Fetcher> {
        Ok(Fetcher::from_policy(&self.policy, self.cancel.clone())?)
    }

    /// The registry cache, synced first if none exists yet.
    pub fn cache(&self, fetcher: &Fetcher) -> Result<ModuleCache> {
        if let Some(cache) = ModuleCache::load(&self.project)? {
            return Ok(cache);
        }
        tracing::info!("no registry cache yet, syncing origins");
        Ok(fpm_registry::sync_project(&self.project, fetcher)?)
    }
}
