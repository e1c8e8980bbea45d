//! # Git Operations
//!
//! Interface boundary to the system `git` command. All git interaction in the
//! crate goes through the [`GitOperations`] trait so the sync engine and the
//! discovery scanner can be exercised in tests without spawning processes.
//!
//! Using the system git means SSH keys, credential helpers, and anything else
//! configured in `~/.gitconfig` work without any authentication handling here.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use crate::error::{Error, Result};

/// Interface to the external git command line tool.
pub trait GitOperations: Send + Sync {
    /// Clone `url` into `target`, creating parent directories first.
    fn clone_repo(&self, url: &str, target: &Path) -> Result<()>;

    /// Fetch and fast-forward the currently checked-out branch (`git pull`).
    fn pull(&self, repo_dir: &Path) -> Result<()>;

    /// Configured origin URL of a checkout, or `None` when no origin is set.
    /// An absent origin is not an error.
    fn origin_url(&self, repo_dir: &Path) -> Result<Option<String>>;

    /// Whether the working tree has staged or unstaged modifications.
    fn has_uncommitted(&self, repo_dir: &Path) -> Result<bool>;

    /// Whether local commits exist that are unpublished relative to the
    /// upstream tracking branch. A missing upstream reads as `false`.
    fn has_unpublished(&self, repo_dir: &Path) -> Result<bool>;
}

/// The default implementation, wrapping the system `git` binary.
pub struct SystemGit;

fn run_git(args: &[&str], cwd: Option<&Path>) -> std::io::Result<Output> {
    let mut cmd = Command::new("git");
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    cmd.output()
}

fn operation_error(operation: &str, target: &str, output: &Output) -> Error {
    Error::GitOperation {
        operation: operation.to_string(),
        target: target.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
}

fn spawn_error(operation: &str, target: &str, err: std::io::Error) -> Error {
    Error::GitOperation {
        operation: operation.to_string(),
        target: target.to_string(),
        stderr: err.to_string(),
    }
}

impl GitOperations for SystemGit {
    fn clone_repo(&self, url: &str, target: &Path) -> Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let output = Command::new("git")
            .args(["clone", url])
            .arg(target)
            .output()
            .map_err(|e| spawn_error("clone", url, e))?;

        if !output.status.success() {
            return Err(operation_error("clone", url, &output));
        }
        Ok(())
    }

    fn pull(&self, repo_dir: &Path) -> Result<()> {
        let target = repo_dir.display().to_string();
        let output =
            run_git(&["pull"], Some(repo_dir)).map_err(|e| spawn_error("pull", &target, e))?;

        if !output.status.success() {
            return Err(operation_error("pull", &target, &output));
        }
        Ok(())
    }

    fn origin_url(&self, repo_dir: &Path) -> Result<Option<String>> {
        let target = repo_dir.display().to_string();
        let output = run_git(&["remote", "get-url", "origin"], Some(repo_dir))
            .map_err(|e| spawn_error("remote get-url", &target, e))?;

        if !output.status.success() {
            // No origin configured
            return Ok(None);
        }

        let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if url.is_empty() {
            Ok(None)
        } else {
            Ok(Some(url))
        }
    }

    fn has_uncommitted(&self, repo_dir: &Path) -> Result<bool> {
        let target = repo_dir.display().to_string();
        let output = run_git(&["status", "--porcelain"], Some(repo_dir))
            .map_err(|e| spawn_error("status", &target, e))?;

        if !output.status.success() {
            return Err(operation_error("status", &target, &output));
        }

        Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
    }

    fn has_unpublished(&self, repo_dir: &Path) -> Result<bool> {
        let target = repo_dir.display().to_string();
        let output = run_git(&["cherry", "-v"], Some(repo_dir))
            .map_err(|e| spawn_error("cherry", &target, e))?;

        // git cherry fails when no upstream is set, which is normal
        if !output.status.success() {
            return Ok(false);
        }

        Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
    }
}
