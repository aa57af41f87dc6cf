//! Module installation
//!
//! Installing a reference resolves it against the registry cache, downloads
//! and extracts the module archive, resyncs the manifest, then recurses into
//! the module's hard dependencies. One [`Installer::install`] call is one
//! session: the session tracks the chain of modules currently being
//! installed (to reject cycles under overwrite) and the modules it already
//! finished (so a diamond dependency is fetched once even with overwrite on).
//! Without overwrite, a module whose directory exists is skipped before the
//! cycle check, so mutual dependencies terminate as skips.
//!
//! ```text
//! framer_download_cache/file.zip   scratch, removed after every module
//! framer_modules/<name>/           extracted module tree
//! ```

use std::collections::HashSet;
use std::fmt;

use fpm_fs::{JsonStore, NormalizedPath, ProjectPath, archive, io};
use fpm_meta::{INFO_FILE, ModuleInfo, Project, REQUIRE_FILE, RequireDescriptor};
use fpm_registry::{Fetcher, ModuleCache, ModuleCacheEntry, local_name, search};

use crate::error::{Error, Result};

/// Name of the downloaded archive inside the scratch directory
const ARCHIVE_FILE: &str = "file.zip";

const INIT_TEMPLATE: &str = r#"import json
import os

with open(os.path.join(os.path.dirname(__file__), "info.json"), encoding="utf-8") as f:
    moduleInfo = json.load(f)

from .module import moduleMain
"#;

const MODULE_TEMPLATE: &str = r#"class moduleMain:
    def __init__(self, framer, logger):
        self.framer = framer
        self.logger = logger
"#;

/// Picks one module when a reference matches several cache entries.
pub trait Disambiguate {
    /// Choose among `candidates` (two or more qualified names, in cache
    /// order) for `reference`. Returns the index of the chosen candidate.
    ///
    /// Returning [`Error::Interrupted`] aborts the whole install.
    fn choose(&mut self, reference: &str, candidates: &[String]) -> Result<usize>;
}

impl<F> Disambiguate for F
where
    F: FnMut(&str, &[String]) -> Result<usize>,
{
    fn choose(&mut self, reference: &str, candidates: &[String]) -> Result<usize> {
        self(reference, candidates)
    }
}

/// Per-invocation install settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Replace modules that are already installed
    pub overwrite: bool,
}

/// What happened to one visited module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    /// Already present, or already handled earlier in the same session
    Skipped,
    /// A dependency reference that matched nothing
    Missing,
}

impl InstallOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstallOutcome::Installed => "installed",
            InstallOutcome::Skipped => "skipped",
            InstallOutcome::Missing => "missing",
        }
    }
}

impl fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an [`InstallReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRecord {
    /// Reference as written by the user or the parent's `require.json`
    pub reference: String,
    /// Resolved qualified name; the bare reference for [`InstallOutcome::Missing`]
    pub module: String,
    pub outcome: InstallOutcome,
}

/// Every module visited by an install, in visit order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    records: Vec<InstallRecord>,
}

impl InstallReport {
    pub fn records(&self) -> &[InstallRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Qualified names with the given outcome.
    pub fn with_outcome(&self, outcome: InstallOutcome) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.outcome == outcome)
            .map(|r| r.module.as_str())
            .collect()
    }

    pub fn installed(&self) -> Vec<&str> {
        self.with_outcome(InstallOutcome::Installed)
    }

    pub fn skipped(&self) -> Vec<&str> {
        self.with_outcome(InstallOutcome::Skipped)
    }

    pub fn missing(&self) -> Vec<&str> {
        self.with_outcome(InstallOutcome::Missing)
    }

    fn push(&mut self, reference: &str, module: &str, outcome: InstallOutcome) {
        self.records.push(InstallRecord {
            reference: reference.to_string(),
            module: module.to_string(),
            outcome,
        });
    }
}

#[derive(Debug, Default)]
struct Session {
    chain: Vec<String>,
    completed: HashSet<String>,
    report: InstallReport,
}

/// Installs modules from a synced registry cache into a project.
pub struct Installer<'a> {
    project: &'a Project,
    cache: &'a ModuleCache,
    fetcher: &'a Fetcher,
    chooser: &'a mut dyn Disambiguate,
}

impl<'a> Installer<'a> {
    pub fn new(
        project: &'a Project,
        cache: &'a ModuleCache,
        fetcher: &'a Fetcher,
        chooser: &'a mut dyn Disambiguate,
    ) -> Self {
        Self {
            project,
            cache,
            fetcher,
            chooser,
        }
    }

    /// Install `reference` and its hard dependencies.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if `reference` itself matches nothing; nothing
    ///   is touched in that case
    /// - [`Error::DependencyCycle`] if, with overwrite on, a dependency leads
    ///   back to a module that is still being installed
    /// - fetch failures and interrupts from the registry, which abort the
    ///   whole tree
    pub fn install(&mut self, reference: &str, options: InstallOptions) -> Result<InstallReport> {
        let qualified = self.resolve(reference)?.ok_or_else(|| Error::NotFound {
            reference: reference.to_string(),
        })?;

        let mut session = Session::default();
        self.install_resolved(reference, qualified, options, &mut session)?;
        Ok(session.report)
    }

    /// Install one top-level reference into an existing session.
    fn install_root(
        &mut self,
        reference: &str,
        options: InstallOptions,
        session: &mut Session,
    ) -> Result<()> {
        let qualified = self.resolve(reference)?.ok_or_else(|| Error::NotFound {
            reference: reference.to_string(),
        })?;
        self.install_resolved(reference, qualified, options, session)
    }

    /// Map a reference to a qualified cache key.
    ///
    /// An exact key is taken as is. Anything else goes through keyword
    /// search and, for several matches, the chooser.
    fn resolve(&mut self, reference: &str) -> Result<Option<String>> {
        if self.cache.contains(reference) {
            return Ok(Some(reference.to_string()));
        }

        let mut candidates = search(self.cache, reference);
        match candidates.len() {
            0 => Ok(None),
            1 => Ok(candidates.pop()),
            count => {
                let index = self.chooser.choose(reference, &candidates)?;
                if index >= count {
                    return Err(Error::Prompt {
                        message: format!("choice {index} out of range for {count} candidates"),
                    });
                }
                tracing::debug!(reference, chosen = %candidates[index], "disambiguated");
                Ok(Some(candidates.swap_remove(index)))
            }
        }
    }

    fn install_dependency(
        &mut self,
        reference: &str,
        options: InstallOptions,
        session: &mut Session,
    ) -> Result<()> {
        match self.resolve(reference)? {
            Some(qualified) => self.install_resolved(reference, qualified, options, session),
            None => {
                tracing::warn!(
                    reference,
                    required_by = ?session.chain.last(),
                    "dependency not found in registry cache"
                );
                session.report.push(reference, reference, InstallOutcome::Missing);
                Ok(())
            }
        }
    }

    fn install_resolved(
        &mut self,
        reference: &str,
        qualified: String,
        options: InstallOptions,
        session: &mut Session,
    ) -> Result<()> {
        if session.completed.contains(&qualified) {
            tracing::debug!(module = %qualified, "already handled in this session");
            session.report.push(reference, &qualified, InstallOutcome::Skipped);
            return Ok(());
        }

        let cache = self.cache;
        let entry = cache.get(&qualified).ok_or_else(|| Error::NotFound {
            reference: qualified.clone(),
        })?;
        let module_dir = self.project.module_dir(local_name(&qualified))?;

        // Without overwrite an installed module ends the walk, which also
        // settles mutual dependencies.
        if module_dir.is_dir() && !options.overwrite {
            tracing::info!(module = %qualified, "already installed, skipping");
            session.report.push(reference, &qualified, InstallOutcome::Skipped);
            session.completed.insert(qualified);
            return Ok(());
        }
        if session.chain.contains(&qualified) {
            let mut chain = session.chain.clone();
            chain.push(qualified);
            return Err(Error::DependencyCycle { chain });
        }

        self.fetch_module(entry, &module_dir)?;
        resync_manifest(self.project)?;
        tracing::info!(module = %qualified, dir = %module_dir, "installed module");
        session.report.push(reference, &qualified, InstallOutcome::Installed);

        session.chain.push(qualified.clone());
        for dependency in entry.dependencies() {
            self.install_dependency(dependency, options, session)?;
        }
        session.chain.pop();
        session.completed.insert(qualified);
        Ok(())
    }

    /// Download into a fresh scratch directory and extract over `module_dir`.
    /// The scratch directory is removed whatever the outcome.
    fn fetch_module(&self, entry: &ModuleCacheEntry, module_dir: &NormalizedPath) -> Result<()> {
        let scratch = self.project.path(ProjectPath::DownloadCache);
        io::clean_dir(&scratch)?;

        let result = self.download_and_extract(entry, &scratch, module_dir);

        if let Err(e) = io::remove_dir(&scratch) {
            tracing::warn!(dir = %scratch, error = %e, "failed to remove download scratch");
        }
        result
    }

    fn download_and_extract(
        &self,
        entry: &ModuleCacheEntry,
        scratch: &NormalizedPath,
        module_dir: &NormalizedPath,
    ) -> Result<()> {
        let archive_path = scratch.join(ARCHIVE_FILE).to_native();
        if !self.fetcher.download(&entry.download, &archive_path)? {
            return Err(fpm_registry::Error::FetchFailure {
                url: entry.download.clone(),
                attempts: self.fetcher.attempts(),
            }
            .into());
        }

        io::remove_dir(module_dir)?;
        archive::unpack(&archive_path, module_dir.as_ref())?;
        Ok(())
    }
}

/// Rewrite the manifest's `modules` list from the module root listing.
///
/// The manifest file is only touched when the list actually changes.
/// Returns the installed module names.
pub fn resync_manifest(project: &Project) -> Result<Vec<String>> {
    let installed = project.installed_modules()?;
    let changed = project.manifest_store().update(|manifest| {
        if manifest.modules == installed {
            return false;
        }
        manifest.set_modules(installed.clone());
        true
    })?;
    if changed {
        tracing::debug!(modules = ?installed, "resynced manifest");
    }
    Ok(installed)
}

/// Remove an installed module. Returns false if it was not installed.
///
/// Dependencies are left in place and dependents are not checked.
pub fn uninstall(project: &Project, name: &str) -> Result<bool> {
    let dir = project.module_dir(name)?;
    let removed = io::remove_dir(&dir)?;
    resync_manifest(project)?;
    if removed {
        tracing::info!(module = name, "uninstalled module");
    }
    Ok(removed)
}

/// Scaffold a new local module. Returns false if `name` already exists.
pub fn create(project: &Project, name: &str) -> Result<bool> {
    let dir = project.module_dir(name)?;
    if dir.is_dir() {
        tracing::info!(module = name, "module already exists");
        return Ok(false);
    }

    let store = JsonStore::new();
    store.save(&dir.join(INFO_FILE), &ModuleInfo::scaffold())?;
    store.save(&dir.join(REQUIRE_FILE), &RequireDescriptor::default())?;
    io::write_text(&dir.join("__init__.py"), INIT_TEMPLATE)?;
    io::write_text(&dir.join("module.py"), MODULE_TEMPLATE)?;

    resync_manifest(project)?;
    tracing::info!(module = name, dir = %dir, "created module");
    Ok(true)
}

/// Reinstall every module listed in the manifest.
///
/// Syncs the trusted origins first, then installs each listed name within
/// one shared session, so a module reached both from the list and as a
/// dependency is fetched once. A name that no longer matches anything is reported
/// [`InstallOutcome::Missing`] and the restore continues.
pub fn restore(
    project: &Project,
    fetcher: &Fetcher,
    chooser: &mut dyn Disambiguate,
    options: InstallOptions,
) -> Result<InstallReport> {
    let listed = project.manifest_store().load()?.modules;
    let modules_dir = project.modules_dir();
    if !modules_dir.is_dir() {
        io::clean_dir(&modules_dir)?;
    }

    let cache = fpm_registry::sync_project(project, fetcher)?;
    let mut installer = Installer::new(project, &cache, fetcher, chooser);
    let mut session = Session::default();

    for name in &listed {
        match installer.install_root(name, options, &mut session) {
            Ok(()) => {}
            Err(Error::NotFound { reference }) => {
                tracing::warn!(module = %reference, "listed module not offered by any origin");
                session
                    .report
                    .push(&reference, &reference, InstallOutcome::Missing);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(session.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpm_registry::CancelFlag;
    use fpm_test_utils::{FakeOrigin, StaticTransport, TestProject};
    use pretty_assertions::assert_eq;

    const O: &str = "https://o.example";

    fn setup(origin: FakeOrigin) -> (TestProject, StaticTransport, Fetcher, ModuleCache) {
        let test = TestProject::initialized();
        let transport = StaticTransport::new();
        origin.publish(&transport);
        let fetcher = Fetcher::new(transport.clone(), 3, CancelFlag::new());
        let cache = fpm_registry::sync(&[origin.url().to_string()], &fetcher).unwrap();
        (test, transport, fetcher, cache)
    }

    fn never_asked(_: &str, candidates: &[String]) -> Result<usize> {
        panic!("unexpected prompt for {candidates:?}")
    }

    #[test]
    fn exact_key_skips_search_and_prompt() {
        let (test, _, fetcher, cache) =
            setup(FakeOrigin::new(O, "O").module("foo", &[]).module("foobar", &[]));
        let project = test.project();
        let mut chooser = never_asked;
        let mut installer = Installer::new(&project, &cache, &fetcher, &mut chooser);

        let report = installer.install("foo@O", InstallOptions::default()).unwrap();

        assert_eq!(report.installed(), vec!["foo@O"]);
        assert_eq!(test.manifest().modules, vec!["foo"]);
    }

    #[test]
    fn chooser_index_out_of_range_is_prompt_error() {
        let (test, _, fetcher, cache) =
            setup(FakeOrigin::new(O, "O").module("foo", &[]).module("foobar", &[]));
        let project = test.project();
        let mut chooser = |_: &str, _: &[String]| -> Result<usize> { Ok(7) };
        let mut installer = Installer::new(&project, &cache, &fetcher, &mut chooser);

        let err = installer.install("foo", InstallOptions::default()).unwrap_err();

        assert!(matches!(err, Error::Prompt { .. }), "got {err:?}");
        test.assert_file_not_exists("framer_modules/foo");
    }

    #[test]
    fn declined_prompt_is_interrupted() {
        let (test, _, fetcher, cache) =
            setup(FakeOrigin::new(O, "O").module("foo", &[]).module("foobar", &[]));
        let project = test.project();
        let mut chooser = |_: &str, _: &[String]| -> Result<usize> { Err(Error::Interrupted) };
        let mut installer = Installer::new(&project, &cache, &fetcher, &mut chooser);

        let err = installer.install("foo", InstallOptions::default()).unwrap_err();

        assert!(err.is_interrupted());
    }

    #[test]
    fn unreachable_archive_fails_and_cleans_scratch() {
        let origin = FakeOrigin::new(O, "O").module("alpha", &[]);
        let (test, transport, fetcher, cache) = setup(origin.clone());
        transport.remove(&origin.doc("alpha/file.zip"));
        let project = test.project();
        let mut chooser = never_asked;
        let mut installer = Installer::new(&project, &cache, &fetcher, &mut chooser);

        let err = installer.install("alpha", InstallOptions::default()).unwrap_err();

        assert!(
            matches!(err, Error::Registry(fpm_registry::Error::FetchFailure { attempts: 3, .. })),
            "got {err:?}"
        );
        assert_eq!(transport.request_count(&origin.doc("alpha/file.zip")), 3);
        test.assert_file_not_exists("framer_download_cache");
        test.assert_file_not_exists("framer_modules/alpha");
    }

    #[test]
    fn create_scaffolds_module_and_lists_it() {
        let test = TestProject::initialized();
        let project = test.project();

        assert!(create(&project, "greeter").unwrap());
        assert!(!create(&project, "greeter").unwrap());

        test.assert_file_contains("framer_modules/greeter/module.py", "class moduleMain");
        test.assert_file_contains("framer_modules/greeter/__init__.py", "info.json");
        assert_eq!(
            project.read_module_info("greeter").unwrap(),
            ModuleInfo::scaffold()
        );
        assert_eq!(
            project.read_module_require("greeter").unwrap(),
            RequireDescriptor::default()
        );
        assert_eq!(test.manifest().modules, vec!["greeter"]);
    }

    #[test]
    fn create_rejects_unsafe_name() {
        let test = TestProject::initialized();
        assert!(create(&test.project(), "../evil").is_err());
        test.assert_file_not_exists("evil");
    }

    #[test]
    fn uninstall_removes_directory_only() {
        let test = TestProject::initialized();
        test.write_module("alpha", &["beta"]);
        test.write_module("beta", &[]);
        let project = test.project();
        resync_manifest(&project).unwrap();

        assert!(uninstall(&project, "alpha").unwrap());
        assert!(!uninstall(&project, "alpha").unwrap());

        test.assert_file_exists("framer_modules/beta");
        assert_eq!(test.manifest().modules, vec!["beta"]);
    }

    #[test]
    fn resync_ignores_hidden_and_cache_dirs() {
        let test = TestProject::initialized();
        test.write_module("alpha", &[]);
        test.write_file("framer_modules/.git/HEAD", "ref");
        test.write_file("framer_modules/__pycache__/x.pyc", "");
        test.write_file("framer_modules/stray.txt", "");

        let installed = resync_manifest(&test.project()).unwrap();

        assert_eq!(installed, vec!["alpha"]);
        assert_eq!(test.manifest().modules, vec!["alpha"]);
    }
}
