//! End-to-end tests for the `sync` command
//!
//! These tests invoke the actual CLI binary and validate its behavior
//! from a user's perspective.

mod common;
use common::prelude::*;

fn repo_fleet() -> Command {
    Command::cargo_bin("repo-fleet").unwrap()
}

/// Test that --help flag shows help information
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_sync_help() {
    repo_fleet()
        .arg("sync")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Clone or update repositories declared in manifest files",
        ));
}

/// A missing manifest file fails with an attributable error
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_sync_missing_manifest() {
    repo_fleet()
        .arg("sync")
        .arg("/nonexistent/fleet.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/fleet.toml"));
}

/// One unreadable manifest does not prevent a sibling manifest from running
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_sync_sibling_manifest_isolation() {
    let temp = assert_fs::TempDir::new().unwrap();
    let good = temp.child("good.toml");
    good.write_str("sites = []\n").unwrap();

    repo_fleet()
        .current_dir(temp.path())
        .arg("sync")
        .arg("/nonexistent/fleet.toml")
        .arg(good.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("/nonexistent/fleet.toml"))
        .stdout(predicate::str::contains("no repositories were processed"));
}

/// An empty manifest renders the labeled empty report
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_sync_empty_manifest() {
    let temp = assert_fs::TempDir::new().unwrap();
    let manifest = temp.child("fleet.toml");
    manifest.write_str("sites = []\n").unwrap();

    repo_fleet()
        .arg("sync")
        .arg(manifest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("no repositories were processed"));
}

/// A manifest with unknown fields is rejected as a parse error
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_sync_rejects_unknown_fields() {
    let temp = assert_fs::TempDir::new().unwrap();
    let manifest = temp.child("fleet.toml");
    manifest
        .write_str("[[sites]]\nremote_prefix = \"https://github.com/org\"\ndir = \"/tmp\"\n")
        .unwrap();

    repo_fleet()
        .arg("sync")
        .arg(manifest.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse manifest"));
}

/// Dry run reports planned actions without touching git
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_sync_dry_run_reports_planned_clone() {
    let temp = assert_fs::TempDir::new().unwrap();
    let manifest = temp.child("fleet.toml");
    manifest
        .write_str(&format!(
            "[[sites]]\nremote = \"https://github.com/org\"\ndir = \"{}\"\n\n  [[sites.repos]]\n  repo = \"service\"\n",
            temp.path().join("checkouts").display()
        ))
        .unwrap();

    repo_fleet()
        .arg("sync")
        .arg("--dry-run")
        .arg(manifest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("would clone"))
        .stdout(predicate::str::contains("1 repositories, 1 succeeded, 0 failed"));

    assert!(!temp.path().join("checkouts").exists());
}

/// Sync clones a missing repository from a local remote, then updates it on
/// the next run
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_sync_clone_then_update() {
    if !git_available() {
        return;
    }
    let temp = assert_fs::TempDir::new().unwrap();
    let remote = temp.path().join("remotes").join("service.git");
    init_bare_remote(&remote);

    let checkouts = temp.path().join("checkouts");
    let manifest = temp.child("fleet.toml");
    // A trailing separator on the prefix keeps plain local paths joinable
    manifest
        .write_str(&format!(
            "[[sites]]\nremote = \"{}/\"\ndir = \"{}\"\n\n  [[sites.repos]]\n  repo = \"service\"\n",
            temp.path().join("remotes").display(),
            checkouts.display()
        ))
        .unwrap();

    repo_fleet()
        .arg("sync")
        .arg(manifest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 succeeded, 0 failed"));
    assert!(checkouts.join("service").join("README.md").exists());

    // Second run takes the update path and still succeeds
    repo_fleet()
        .arg("sync")
        .arg(manifest.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 succeeded, 0 failed"));
}

/// A failing repository yields a nonzero exit and an attributable report line
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_sync_failure_is_attributable() {
    if !git_available() {
        return;
    }
    let temp = assert_fs::TempDir::new().unwrap();
    let manifest = temp.child("fleet.toml");
    manifest
        .write_str(&format!(
            "[[sites]]\nremote = \"{}/\"\ndir = \"{}\"\n\n  [[sites.repos]]\n  repo = \"does-not-exist\"\n",
            temp.path().join("remotes").display(),
            temp.path().join("checkouts").display()
        ))
        .unwrap();

    repo_fleet()
        .arg("sync")
        .arg(manifest.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("does-not-exist"))
        .stdout(predicate::str::contains("0 succeeded, 1 failed"));
}

/// Quiet mode suppresses the report body
#[test]
#[cfg_attr(not(feature = "integration-tests"), ignore)]
fn test_sync_quiet_suppresses_report() {
    let temp = assert_fs::TempDir::new().unwrap();
    let manifest = temp.child("fleet.toml");
    manifest.write_str("sites = []\n").unwrap();

    repo_fleet()
        .arg("sync")
        .arg("--quiet")
        .arg(manifest.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
