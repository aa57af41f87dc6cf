//! Module descriptors.
//!
//! Every module carries its metadata as plain data so that neither the
//! installer nor the publisher ever has to execute module code to learn
//! about it:
//!
//! ```text
//! framer_modules/<name>/
//!   info.json      {"author": "...", "description": "...", "hooker": false}
//!   require.json   {"dependencies": [], "option_dependencies": [], "pip_dependencies": []}
//! ```
//!
//! Origins serve the same two documents per module.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// File name of the module metadata document.
pub const INFO_FILE: &str = "info.json";

/// File name of the module dependency descriptor.
pub const REQUIRE_FILE: &str = "require.json";

/// Static metadata of a module.
///
/// All fields are optional on decode: an origin that serves a partial
/// document still produces an entry. Keys this type does not know about
/// are kept in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the module hooks into the framework core rather than running
    /// as a regular module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooker: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModuleInfo {
    /// Metadata written into a freshly created module.
    pub fn scaffold() -> Self {
        Self {
            author: Some("your name".to_string()),
            description: Some("your description here".to_string()),
            hooker: Some(false),
            extra: Map::new(),
        }
    }

    /// True when none of the known fields were provided.
    pub fn is_incomplete(&self) -> bool {
        self.author.is_none() || self.description.is_none() || self.hooker.is_none()
    }
}

/// Declared dependency edges of a module.
///
/// Only `dependencies` drives installation. The other two lists are
/// advisory and belong to the module loader of the host framework.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequireDescriptor {
    /// Module references installed together with this module.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Module references the module can use when present.
    #[serde(default)]
    pub option_dependencies: Vec<String>,
    /// Python packages the module needs at runtime.
    #[serde(default)]
    pub pip_dependencies: Vec<String>,
}
