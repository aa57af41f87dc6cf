//! Origin publishing
//!
//! Turns the installed modules of a project into a static origin tree under
//! `maker_release/`, ready to be uploaded to the configured base URL:
//!
//! ```text
//! maker_release/
//!   map.json
//!   <module>/info.json
//!   <module>/require.json
//!   <module>/file.zip
//! ```
//!
//! Publishing is purely local and idempotent: the same module trees produce
//! byte-identical output.

use fpm_fs::{JsonStore, NormalizedPath, ProjectPath, archive, checksum, io};
use fpm_meta::{INFO_FILE, MakerConfig, ModuleInfo, Project, REQUIRE_FILE, RequireDescriptor};
use fpm_registry::OriginMap;

use crate::error::Result;

const MAP_FILE: &str = "map.json";
const ARCHIVE_FILE: &str = "file.zip";

/// One module written to the release directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedModule {
    pub name: String,
    /// Archive-relative paths packed into `file.zip`
    pub files: Vec<String>,
    /// `sha256:<hex>` of `file.zip`
    pub checksum: String,
}

/// Result of a [`publish`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub release_dir: NormalizedPath,
    pub map: OriginMap,
    pub modules: Vec<PublishedModule>,
}

/// Write the release tree for every installed module.
///
/// All descriptors are read before `maker_release/` is touched, so a module
/// without `info.json` fails the publish without clearing the previous
/// release.
///
/// # Errors
///
/// `MissingDescriptor` for a module without `info.json`, filesystem and
/// archive errors otherwise.
pub fn publish(project: &Project, config: &MakerConfig) -> Result<PublishReport> {
    let names = project.installed_modules()?;
    let mut descriptors: Vec<(&str, ModuleInfo, RequireDescriptor)> = Vec::with_capacity(names.len());
    for name in &names {
        let info = project.read_module_info(name)?;
        let require = project.read_module_require(name)?;
        descriptors.push((name.as_str(), info, require));
    }

    let release_dir = project.path(ProjectPath::MakerRelease);
    io::clean_dir(&release_dir)?;

    let store = JsonStore::new();
    let map = OriginMap {
        name: config.name.clone(),
        base: config.base.clone(),
        modules: names.clone(),
    };
    store.save(&release_dir.join(MAP_FILE), &map)?;

    let mut modules = Vec::with_capacity(descriptors.len());
    for (name, info, require) in descriptors {
        let out_dir = release_dir.join(name);
        store.save(&out_dir.join(INFO_FILE), &info)?;
        store.save(&out_dir.join(REQUIRE_FILE), &require)?;

        let zip_path = out_dir.join(ARCHIVE_FILE).to_native();
        let files = archive::pack_dir(project.module_dir(name)?.as_ref(), &zip_path)?;
        let checksum = checksum::compute_file_checksum(&zip_path)
            .map_err(|e| fpm_fs::Error::io(&zip_path, e))?;

        tracing::debug!(module = name, files = files.len(), %checksum, "published module");
        modules.push(PublishedModule {
            name: name.to_string(),
            files,
            checksum,
        });
    }

    tracing::info!(
        origin = %map.name,
        modules = modules.len(),
        dir = %release_dir,
        "release written"
    );
    Ok(PublishReport {
        release_dir,
        map,
        modules,
    })
}
