//! Core operations of the Framer package manager
//!
//! - [`installer`] resolves module references against the registry cache,
//!   installs them with their hard dependencies, and manages the module
//!   tree (uninstall, scaffolding, manifest resync, restore)
//! - [`maker`] publishes the installed modules as a static origin

pub mod error;
pub mod installer;
pub mod maker;

pub use error::{Error, Result};
pub use installer::{
    Disambiguate, InstallOptions, InstallOutcome, InstallRecord, InstallReport, Installer,
    create, restore, resync_manifest, uninstall,
};
pub use maker::{PublishReport, PublishedModule, publish};
