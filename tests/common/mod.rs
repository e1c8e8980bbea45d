//! Shared test utilities for the E2E suite.
//!
//! Provides git fixture helpers (local bare remotes, checkouts with a
//! configured origin) and a skip guard for machines without git installed.

use std::path::Path;
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::Command;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git_available, init_bare_remote, init_repo_with_origin};
}

/// True when a usable git binary is on PATH. Tests exercising real git
/// operations return early when it is missing.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn run_git(args: &[&str], cwd: &Path) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to spawn git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create a bare repository with one commit, usable as a clone source.
#[allow(dead_code)]
pub fn init_bare_remote(path: &Path) {
    std::fs::create_dir_all(path).unwrap();
    run_git(&["init", "--bare", "--initial-branch=main", "."], path);

    // Seed a commit through a scratch checkout
    let scratch = path.parent().unwrap().join("scratch-seed");
    std::fs::create_dir_all(&scratch).unwrap();
    run_git(&["clone", path.to_str().unwrap(), "."], &scratch);
    std::fs::write(scratch.join("README.md"), "seed").unwrap();
    run_git(&["add", "README.md"], &scratch);
    run_git(&["-c", "user.email=test@example.com", "-c", "user.name=test", "commit", "-m", "seed"], &scratch);
    run_git(&["push", "origin", "main"], &scratch);
    std::fs::remove_dir_all(&scratch).unwrap();
}

/// Create a non-bare repository with `origin` configured (no network access
/// is ever made; discovery only reads the configured URL).
#[allow(dead_code)]
pub fn init_repo_with_origin(path: &Path, origin: &str) {
    std::fs::create_dir_all(path).unwrap();
    run_git(&["init", "--initial-branch=main", "."], path);
    run_git(&["remote", "add", "origin", origin], path);
}
