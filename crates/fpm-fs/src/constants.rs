//! Constants and enums for project filesystem paths.

use std::path::Path;

/// Directory names that never count as module content.
pub const EXCLUDED_NAMES: &[&str] = &["__pycache__"];

/// Whether a directory entry is hidden or on the exclusion list.
///
/// Applies both to the module root listing and to module archives.
pub fn is_excluded_entry(name: &str) -> bool {
    name.starts_with('.') || EXCLUDED_NAMES.contains(&name)
}

/// Well-known files and directories of a Framer project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// The `framerpkg.json` project manifest
    Manifest,
    /// The `framer_modules` module root
    ModulesDir,
    /// The `origin-cache.json` merged registry cache
    OriginCache,
    /// The `framer_download_cache` scratch directory
    DownloadCache,
    /// The `maker_release` publisher output directory
    MakerRelease,
    /// The `origin-maker.json` publisher configuration
    MakerConfig,
}

impl ProjectPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manifest => "framerpkg.json",
            Self::ModulesDir => "framer_modules",
            Self::OriginCache => "origin-cache.json",
            Self::DownloadCache => "framer_download_cache",
            Self::MakerRelease => "maker_release",
            Self::MakerConfig => "origin-maker.json",
        }
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_and_cache_entries_are_excluded() {
        assert!(is_excluded_entry(".git"));
        assert!(is_excluded_entry(".DS_Store"));
        assert!(is_excluded_entry("__pycache__"));
        assert!(!is_excluded_entry("module.py"));
        assert!(!is_excluded_entry("pycache"));
    }
}
