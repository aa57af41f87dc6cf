//! Origin catalog wire format.

use serde::{Deserialize, Serialize};

/// Catalog an origin publishes as `map.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginMap {
    /// Origin name, used as the `@origin` suffix of qualified names
    pub name: String,
    /// Base URL the origin claims to be served from
    #[serde(default)]
    pub base: String,
    /// Module names available from this origin
    #[serde(default)]
    pub modules: Vec<String>,
}

/// URL of a document below an origin.
pub(crate) fn document_url(origin: &str, path: &str) -> String {
    format!("{}/{}", origin.trim_end_matches('/'), path)
}
