//! [`TestProject`] builder for package manager test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use fpm_fs::ProjectPath;
use fpm_meta::{Manifest, Project};
use serde_json::{Value, json};
use tempfile::TempDir;

/// A temporary project directory with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use fpm_test_utils::TestProject;
///
/// let project = TestProject::initialized();
/// project.write_module("alpha", &["beta"]);
/// project.assert_file_exists("framer_modules/alpha/info.json");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a directory with an empty manifest and module root.
    pub fn initialized() -> Self {
        let test = Self::new();
        test.project().init().unwrap();
        test
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn project(&self) -> Project {
        Project::new(self.root())
    }

    /// Absolute path of `rel` below the project root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write a file below the project root, creating parent directories.
    pub fn write_file(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    /// Lay out an installed module with complete metadata and the given
    /// hard dependencies.
    pub fn write_module(&self, name: &str, dependencies: &[&str]) {
        let dir = format!("{}/{name}", ProjectPath::ModulesDir);
        self.write_file(
            &format!("{dir}/info.json"),
            &json!({"author": "tester", "description": format!("{name} module"), "hooker": false})
                .to_string(),
        );
        self.write_file(
            &format!("{dir}/require.json"),
            &json!({"dependencies": dependencies, "option_dependencies": [], "pip_dependencies": []})
                .to_string(),
        );
        self.write_file(&format!("{dir}/module.py"), &format!("# {name}\n"));
    }

    /// Write the manifest as raw JSON.
    pub fn write_manifest(&self, manifest: &Value) {
        self.write_file(ProjectPath::Manifest.as_str(), &manifest.to_string());
    }

    /// Current manifest as stored on disk.
    pub fn manifest(&self) -> Manifest {
        self.project().manifest_store().load().unwrap()
    }

    /// Parse a JSON file below the project root.
    pub fn read_json(&self, rel: &str) -> Value {
        let path = self.path(rel);
        let text = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()));
        serde_json::from_str(&text).unwrap()
    }

    /// Assert that `rel` exists below the project root.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `rel` does **not** exist below the project root.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `rel` contains `content`.
    pub fn assert_file_contains(&self, rel: &str, content: &str) {
        let full_path = self.path(rel);
        let file_content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            file_content
        );
    }
}
