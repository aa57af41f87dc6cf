//! In-memory origins.
//!
//! [`StaticTransport`] answers requests from a URL to bytes table and
//! records every request it sees. [`FakeOrigin`] builds a complete origin
//! (catalog, descriptors and archives) and publishes it into a transport.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use std::rc::Rc;

use fpm_registry::{Transport, TransportError};
use serde_json::{Value, json};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Transport serving fixed documents.
///
/// Clones share the document table and request log, so a test can keep a
/// handle after moving the transport into a `Fetcher`. Unknown URLs answer
/// with HTTP 404.
#[derive(Debug, Clone, Default)]
pub struct StaticTransport {
    docs: Rc<RefCell<HashMap<String, Vec<u8>>>>,
    requests: Rc<RefCell<Vec<String>>>,
}

impl StaticTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.docs.borrow_mut().insert(url.to_string(), body.into());
    }

    pub fn serve_json(&self, url: &str, value: &Value) {
        self.serve(url, value.to_string());
    }

    /// Stop serving `url`.
    pub fn remove(&self, url: &str) {
        self.docs.borrow_mut().remove(url);
    }

    /// Serve every file below `dir` at `base_url/<relative path>`.
    pub fn serve_dir(&self, base_url: &str, dir: &Path) {
        for entry in fs::read_dir(dir).unwrap() {
            let entry = entry.unwrap();
            let name = entry.file_name().to_string_lossy().into_owned();
            let url = format!("{base_url}/{name}");
            if entry.file_type().unwrap().is_dir() {
                self.serve_dir(&url, &entry.path());
            } else {
                self.serve(&url, fs::read(entry.path()).unwrap());
            }
        }
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    /// How often `url` was requested.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|r| *r == url).count()
    }
}

impl Transport for StaticTransport {
    fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        self.requests.borrow_mut().push(url.to_string());
        self.docs
            .borrow()
            .get(url)
            .cloned()
            .ok_or(TransportError::Status(404))
    }
}

/// Zip bytes of a minimal module tree: descriptors plus `module.py`.
pub fn module_zip(name: &str, dependencies: &[&str]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    let files = [
        ("info.json", info_json(name).to_string()),
        ("require.json", require_json(dependencies).to_string()),
        ("module.py", format!("# {name}\n")),
    ];
    for (file, content) in files {
        writer.start_file(file, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn info_json(name: &str) -> Value {
    json!({"author": "origin", "description": format!("{name} module"), "hooker": false})
}

fn require_json(dependencies: &[&str]) -> Value {
    json!({"dependencies": dependencies, "option_dependencies": [], "pip_dependencies": []})
}

/// Builder for a complete origin.
///
/// ```rust,no_run
/// use fpm_test_utils::{FakeOrigin, StaticTransport};
///
/// let transport = StaticTransport::new();
/// FakeOrigin::new("https://o.example", "O")
///     .module("alpha", &["beta"])
///     .module("beta", &[])
///     .publish(&transport);
/// ```
#[derive(Debug, Clone)]
pub struct FakeOrigin {
    url: String,
    name: String,
    modules: Vec<(String, Vec<String>)>,
}

impl FakeOrigin {
    pub fn new(url: &str, name: &str) -> Self {
        Self {
            url: url.to_string(),
            name: name.to_string(),
            modules: Vec::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Add a module with the given hard dependencies.
    pub fn module(mut self, name: &str, dependencies: &[&str]) -> Self {
        self.modules.push((
            name.to_string(),
            dependencies.iter().map(|d| d.to_string()).collect(),
        ));
        self
    }

    /// URL of a document below this origin.
    pub fn doc(&self, path: &str) -> String {
        format!("{}/{path}", self.url)
    }

    /// Serve the catalog and every module's documents through `transport`.
    pub fn publish(&self, transport: &StaticTransport) {
        let names: Vec<&str> = self.modules.iter().map(|(n, _)| n.as_str()).collect();
        transport.serve_json(
            &self.doc("map.json"),
            &json!({"name": self.name, "base": self.url, "modules": names}),
        );
        for (name, deps) in &self.modules {
            let deps: Vec<&str> = deps.iter().map(String::as_str).collect();
            transport.serve_json(&self.doc(&format!("{name}/info.json")), &info_json(name));
            transport.serve_json(
                &self.doc(&format!("{name}/require.json")),
                &require_json(&deps),
            );
            transport.serve(&self.doc(&format!("{name}/file.zip")), module_zip(name, &deps));
        }
    }
}
