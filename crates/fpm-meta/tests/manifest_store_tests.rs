use fpm_meta::{Error, Manifest, Project};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn load_without_file_returns_empty_manifest() {
    let temp = TempDir::new().unwrap();
    let store = Project::new(temp.path()).manifest_store();

    assert_eq!(store.load().unwrap(), Manifest::default());
    assert!(!store.exists(), "load must not create the file");
}

#[test]
fn malformed_manifest_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("framerpkg.json"), "{ not json").unwrap();
    let store = Project::new(temp.path()).manifest_store();

    let err = store.load().unwrap_err();
    assert!(matches!(err, Error::ManifestParse { .. }), "got {err:?}");
}

#[test]
fn update_persists_changes() {
    let temp = TempDir::new().unwrap();
    let store = Project::new(temp.path()).manifest_store();

    assert!(store.update(|m| m.add_origin("https://origin.example")).unwrap());
    assert!(!store.update(|m| m.add_origin("https://origin.example")).unwrap());

    let on_disk: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("framerpkg.json")).unwrap())
            .unwrap();
    assert_eq!(
        on_disk,
        serde_json::json!({
            "modules": [],
            "disable": [],
            "origins": ["https://origin.example"]
        })
    );
}

#[test]
fn unchanged_update_still_creates_missing_manifest() {
    let temp = TempDir::new().unwrap();
    let store = Project::new(temp.path()).manifest_store();

    assert!(!store.update(|m| m.remove_origin("https://never.example")).unwrap());
    assert!(store.exists());
}

#[test]
fn save_overwrites_whole_document() {
    let temp = TempDir::new().unwrap();
    let store = Project::new(temp.path()).manifest_store();
    store
        .save(&Manifest {
            modules: vec!["old".into()],
            disable: vec!["old".into()],
            origins: vec![],
        })
        .unwrap();

    store.save(&Manifest::default()).unwrap();

    assert_eq!(store.load().unwrap(), Manifest::default());
}
