//! Filesystem primitives for the Framer package manager
//!
//! Provides normalized paths, atomic writes, JSON document storage,
//! directory helpers, and the deterministic zip format modules ship in.

pub mod archive;
pub mod checksum;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;
pub mod store;

pub use constants::{ProjectPath, is_excluded_entry};
pub use error::{Error, Result};
pub use path::{NormalizedPath, validate_path_identifier};
pub use store::JsonStore;
