//! Project state for the Framer package manager
//!
//! Owns the `framerpkg.json` manifest, the on-disk project layout, the
//! descriptors every module carries (`info.json`, `require.json`) and the
//! publisher configuration.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod manifest;
pub mod project;

pub use config::MakerConfig;
pub use descriptor::{INFO_FILE, ModuleInfo, REQUIRE_FILE, RequireDescriptor};
pub use error::{Error, Result};
pub use manifest::{Manifest, ManifestStore};
pub use project::Project;
