//! Publisher configuration from `origin-maker.json`.

use serde::{Deserialize, Serialize};

use fpm_fs::{JsonStore, ProjectPath};

use crate::error::Result;
use crate::project::Project;

/// Identity of the origin a project publishes as.
///
/// Written verbatim into the generated `map.json` next to the module list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakerConfig {
    /// Origin name; becomes the `@origin` suffix of qualified module names
    pub name: String,
    /// Public base URL the release directory will be served from
    pub base: String,
}

impl MakerConfig {
    pub fn new(name: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: base.into(),
        }
    }

    /// Load the project's publisher config, if one has been saved.
    pub fn load(project: &Project) -> Result<Option<Self>> {
        Ok(JsonStore::new().load_optional(&project.path(ProjectPath::MakerConfig))?)
    }

    /// Save as the project's publisher config.
    pub fn save(&self, project: &Project) -> Result<()> {
        Ok(JsonStore::new().save(&project.path(ProjectPath::MakerConfig), self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_missing_config_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(MakerConfig::load(&Project::new(temp.path())).unwrap().is_none());
    }

    #[test]
    fn saved_config_loads_back() {
        let temp = TempDir::new().unwrap();
        let project = Project::new(temp.path());
        let config = MakerConfig::new("community", "https://modules.example/community");

        config.save(&project).unwrap();

        assert_eq!(MakerConfig::load(&project).unwrap(), Some(config));
    }
}
