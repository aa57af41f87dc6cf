//! Shared test utilities for the Framer package manager workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`], a throwaway project directory
//! - [`origin`]: [`FakeOrigin`] catalogs served through [`StaticTransport`]

pub mod origin;
pub mod project;

pub use origin::{FakeOrigin, StaticTransport, module_zip};
pub use project::TestProject;
