use fpm_fs::{Error, JsonStore, NormalizedPath};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Doc {
    #[serde(default)]
    names: Vec<String>,
}

#[test]
fn save_then_load_returns_same_document() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("doc.json"));
    let store = JsonStore::new();
    let doc = Doc {
        names: vec!["alpha".into(), "beta".into()],
    };

    store.save(&path, &doc).unwrap();
    let loaded: Doc = store.load(&path).unwrap();

    assert_eq!(loaded, doc);
}

#[test]
fn saved_document_is_pretty_with_trailing_newline() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("doc.json"));

    JsonStore::new()
        .save(&path, &Doc { names: vec!["a".into()] })
        .unwrap();

    let raw = fs::read_to_string(path.to_native()).unwrap();
    assert_eq!(raw, "{\n  \"names\": [\n    \"a\"\n  ]\n}\n");
}

#[test]
fn load_or_default_on_missing_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("missing.json"));

    let doc: Doc = JsonStore::new().load_or_default(&path).unwrap();

    assert_eq!(doc, Doc::default());
}

#[rstest]
#[case("{")]
#[case("[1, 2]")]
#[case("{\"names\": 7}")]
fn malformed_documents_fail_with_parse_error(#[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("bad.json"));
    fs::write(path.to_native(), content).unwrap();

    let result: Result<Doc, _> = JsonStore::new().load(&path);

    match result {
        Err(Error::Parse { path: reported, .. }) => assert_eq!(reported, path.to_native()),
        other => panic!("expected parse error, got {other:?}"),
    }
}
