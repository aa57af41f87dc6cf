//! Project layout
//!
//! A project is a directory holding the manifest, the module root and the
//! registry cache:
//!
//! ```text
//! <root>/
//!   framerpkg.json
//!   origin-cache.json
//!   origin-maker.json        (publisher config, optional)
//!   framer_modules/<name>/   (one directory per installed module)
//!   framer_download_cache/   (scratch, only during an install)
//!   maker_release/           (publisher output)
//! ```

use std::path::Path;

use fpm_fs::{JsonStore, NormalizedPath, ProjectPath, io, validate_path_identifier};

use crate::descriptor::{INFO_FILE, ModuleInfo, REQUIRE_FILE, RequireDescriptor};
use crate::error::{Error, Result};
use crate::manifest::ManifestStore;

/// Handle on a project directory.
#[derive(Debug, Clone)]
pub struct Project {
    root: NormalizedPath,
}

impl Project {
    /// Open the project rooted at `root`. Nothing is created on disk.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: NormalizedPath::resolve(root),
        }
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Absolute location of a well-known project path.
    pub fn path(&self, which: ProjectPath) -> NormalizedPath {
        self.root.join(which.as_str())
    }

    pub fn modules_dir(&self) -> NormalizedPath {
        self.path(ProjectPath::ModulesDir)
    }

    /// Directory of the module called `name`.
    ///
    /// # Errors
    ///
    /// Fails if `name` cannot be used as a directory name.
    pub fn module_dir(&self, name: &str) -> Result<NormalizedPath> {
        validate_path_identifier(name)?;
        Ok(self.modules_dir().join(name))
    }

    pub fn manifest_store(&self) -> ManifestStore {
        ManifestStore::new(self.path(ProjectPath::Manifest))
    }

    /// Create the manifest and module root if missing. Returns whether the
    /// manifest was created.
    pub fn init(&self) -> Result<bool> {
        let created = self.manifest_store().init()?;
        let modules = self.modules_dir();
        if !modules.is_dir() {
            io::clean_dir(&modules)?;
        }
        Ok(created)
    }

    /// Names of the installed modules: the visible subdirectories of the
    /// module root, sorted.
    pub fn installed_modules(&self) -> Result<Vec<String>> {
        Ok(io::list_subdirs(&self.modules_dir())?)
    }

    /// Whether a directory for `name` exists under the module root.
    pub fn is_installed(&self, name: &str) -> Result<bool> {
        Ok(self.module_dir(name)?.is_dir())
    }

    /// Read the metadata of an installed module.
    pub fn read_module_info(&self, name: &str) -> Result<ModuleInfo> {
        let dir = self.installed_dir(name)?;
        JsonStore::new()
            .load_optional(&dir.join(INFO_FILE))?
            .ok_or_else(|| Error::MissingDescriptor {
                module: name.to_string(),
                file: INFO_FILE.to_string(),
            })
    }

    /// Read the dependency descriptor of an installed module. A module
    /// without `require.json` has no dependencies.
    pub fn read_module_require(&self, name: &str) -> Result<RequireDescriptor> {
        let dir = self.installed_dir(name)?;
        Ok(JsonStore::new().load_or_default(&dir.join(REQUIRE_FILE))?)
    }

    fn installed_dir(&self, name: &str) -> Result<NormalizedPath> {
        let dir = self.module_dir(name)?;
        if !dir.is_dir() {
            return Err(Error::NotInstalled {
                name: name.to_string(),
            });
        }
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn init_creates_manifest_and_module_root_once() {
        let temp = TempDir::new().unwrap();
        let project = Project::new(temp.path());

        assert!(project.init().unwrap());
        assert!(!project.init().unwrap());
        assert!(project.path(ProjectPath::Manifest).is_file());
        assert!(project.modules_dir().is_dir());
    }

    #[test]
    fn module_dir_rejects_unsafe_names() {
        let temp = TempDir::new().unwrap();
        let project = Project::new(temp.path());
        assert!(project.module_dir("../escape").is_err());
        assert!(project.module_dir("alpha").is_ok());
    }

    #[test]
    fn read_module_info_requires_descriptor() {
        let temp = TempDir::new().unwrap();
        let project = Project::new(temp.path());
        fs::create_dir_all(temp.path().join("framer_modules/alpha")).unwrap();

        let err = project.read_module_info("alpha").unwrap_err();
        assert!(matches!(err, Error::MissingDescriptor { .. }), "got {err:?}");

        let require = project.read_module_require("alpha").unwrap();
        assert_eq!(require, RequireDescriptor::default());
    }

    #[test]
    fn reading_uninstalled_module_fails() {
        let temp = TempDir::new().unwrap();
        let project = Project::new(temp.path());
        let err = project.read_module_info("ghost").unwrap_err();
        assert!(matches!(err, Error::NotInstalled { .. }), "got {err:?}");
    }
}
