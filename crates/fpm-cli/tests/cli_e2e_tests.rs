//! End-to-end tests that drive the compiled `framer` binary.
//!
//! Origins are local `maker_release/` directories, read through the
//! filesystem transport, so no network is involved.

use std::path::Path;

use assert_cmd::Command;
use fpm_test_utils::TestProject;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Get a Command for the framer binary, pointed at `project`.
fn framer(project: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_framer"));
    cmd.arg("--project")
        .arg(project)
        .arg("--retries")
        .arg("1")
        .env_remove("FRAMER_PROJECT")
        .env_remove("FRAMER_RETRIES")
        .env_remove("RUST_LOG");
    cmd
}

/// Publish a project with `alpha -> beta` and return it.
fn publisher() -> TestProject {
    let publisher = TestProject::initialized();
    publisher.write_module("alpha", &["beta"]);
    publisher.write_module("beta", &[]);
    framer(publisher.root())
        .args(["origin", "make", "--name", "P", "--base", "https://p.example"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Release written"));
    publisher
}

fn release_dir(publisher: &TestProject) -> String {
    publisher.path("maker_release").to_string_lossy().into_owned()
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_output() {
    Command::new(env!("CARGO_BIN_EXE_framer"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Framer package manager"));
}

#[test]
fn test_version_output() {
    Command::new(env!("CARGO_BIN_EXE_framer"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("framer"));
}

#[test]
fn test_no_command_shows_help_hint() {
    Command::new(env!("CARGO_BIN_EXE_framer"))
        .assert()
        .success()
        .stdout(predicate::str::contains("framer --help"));
}

// ============================================================================
// Project Tests
// ============================================================================

#[test]
fn test_init_creates_project_files() {
    let test = TestProject::new();

    framer(test.root()).arg("init").assert().success();

    assert_eq!(
        test.read_json("framerpkg.json"),
        json!({"modules": [], "disable": [], "origins": []})
    );
    test.assert_file_exists("framer_modules");
}

#[test]
fn test_module_create_list_and_disable() {
    let test = TestProject::initialized();

    framer(test.root()).args(["module", "create", "greeter"]).assert().success();
    framer(test.root()).args(["module", "disable", "greeter"]).assert().success();

    framer(test.root())
        .args(["module", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("greeter").and(predicate::str::contains("(disabled)")));
    framer(test.root())
        .args(["module", "info", "greeter"])
        .assert()
        .success()
        .stdout(predicate::str::contains("your description here"));
}

#[test]
fn test_info_of_missing_module_fails() {
    let test = TestProject::initialized();

    framer(test.root())
        .args(["module", "info", "ghost"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Origin and Install Tests
// ============================================================================

#[test]
fn test_publish_then_install_from_local_origin() {
    let publisher = publisher();
    let consumer = TestProject::initialized();
    framer(consumer.root())
        .args(["origin", "add", release_dir(&publisher).as_str()])
        .assert()
        .success();

    // No cache yet: install syncs first
    framer(consumer.root())
        .args(["module", "install", "alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha@P").and(predicate::str::contains("beta@P")));

    assert_eq!(consumer.manifest().modules, vec!["alpha", "beta"]);
    consumer.assert_file_exists("origin-cache.json");
    consumer.assert_file_contains("framer_modules/beta/module.py", "# beta");
    consumer.assert_file_not_exists("framer_download_cache");

    framer(consumer.root())
        .args(["module", "install", "alpha@P"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already installed"));
}

#[test]
fn test_search_lists_qualified_names() {
    let publisher = publisher();
    let consumer = TestProject::initialized();
    framer(consumer.root())
        .args(["origin", "add", release_dir(&publisher).as_str()])
        .assert()
        .success();
    framer(consumer.root()).args(["origin", "sync"]).assert().success();

    framer(consumer.root())
        .args(["module", "search", "ALP"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha@P").and(predicate::str::contains("beta@P").not()));
}

#[test]
fn test_install_unknown_module_warns_and_succeeds() {
    let publisher = publisher();
    let consumer = TestProject::initialized();
    framer(consumer.root())
        .args(["origin", "add", release_dir(&publisher).as_str()])
        .assert()
        .success();

    framer(consumer.root())
        .args(["module", "install", "nothing-like-this"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_sync_with_unreachable_origin_fails() {
    let consumer = TestProject::initialized();
    let missing = consumer.path("no-such-origin").to_string_lossy().into_owned();
    framer(consumer.root())
        .args(["origin", "add", missing.as_str()])
        .assert()
        .success();

    framer(consumer.root())
        .args(["origin", "sync"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("map.json"));
    consumer.assert_file_not_exists("origin-cache.json");
}

#[test]
fn test_sync_back_restores_manifest_modules() {
    let publisher = publisher();
    let consumer = TestProject::initialized();
    consumer.write_manifest(&json!({
        "modules": ["alpha"],
        "disable": [],
        "origins": [release_dir(&publisher)]
    }));

    framer(consumer.root())
        .args(["module", "sync-back"])
        .assert()
        .success();

    assert_eq!(consumer.manifest().modules, vec!["alpha", "beta"]);
}

#[test]
fn test_del_and_sync_pkg_keep_manifest_in_step() {
    let test = TestProject::initialized();
    test.write_module("alpha", &[]);
    test.write_module("beta", &[]);

    framer(test.root()).args(["module", "sync-pkg"]).assert().success();
    assert_eq!(test.manifest().modules, vec!["alpha", "beta"]);

    framer(test.root()).args(["module", "del", "alpha"]).assert().success();
    assert_eq!(test.manifest().modules, vec!["beta"]);
}
