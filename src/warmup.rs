//! # Warm-up Dispatch
//!
//! After a successful clone or update a checkout can be primed for development
//! by downloading its dependencies. Two decisions live here:
//!
//! - **Whether** to warm up: three-tier precedence per repo. An explicit
//!   `warm_up` on the [`RepoSpec`] wins outright, otherwise the group's
//!   `warm_up_all` applies, otherwise warm-up is skipped. There is no
//!   marker-file fallback when both are unset.
//! - **How** to warm up: the checkout root is probed for known project
//!   markers, and every matching project type contributes its command
//!   sequence (a checkout can be polyglot). A checkout matching no known
//!   type is a successful no-op.
//!
//! Warm-up is best-effort: a failing command aborts the remaining commands
//! but is reported as a warning annotation, never as a failed outcome.

use std::path::Path;
use std::process::Command;

use log::info;

use crate::error::{Error, Result};
use crate::manifest::{RepoSpec, SiteGroup};

/// Whether warm-up should run for `repo` within `group`.
pub fn should_warm_up(repo: &RepoSpec, group: &SiteGroup) -> bool {
    match repo.warm_up {
        Some(explicit) => explicit,
        None => group.warm_up_all,
    }
}

/// One dependency-priming command, run with the checkout root as working
/// directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarmUpStep {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl WarmUpStep {
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.to_string()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

const GO_STEPS: &[WarmUpStep] = &[
    WarmUpStep { program: "go", args: &["mod", "download"] },
    WarmUpStep { program: "go", args: &["mod", "tidy"] },
];
const YARN_STEPS: &[WarmUpStep] = &[WarmUpStep { program: "yarn", args: &["install"] }];
const NPM_STEPS: &[WarmUpStep] = &[WarmUpStep { program: "npm", args: &["install"] }];
const PIP_STEPS: &[WarmUpStep] =
    &[WarmUpStep { program: "pip", args: &["install", "-r", "requirements.txt"] }];
const CARGO_STEPS: &[WarmUpStep] = &[WarmUpStep { program: "cargo", args: &["fetch"] }];

/// Probe `checkout` for project markers and collect the command sequences of
/// every matching project type, in fixed probe order (Go, Node, Python, Rust).
pub fn detect_steps(checkout: &Path) -> Vec<WarmUpStep> {
    let mut steps = Vec::new();

    if checkout.join("go.mod").exists() {
        steps.extend_from_slice(GO_STEPS);
    }

    if checkout.join("package.json").exists() {
        // Lockfile-preferred package manager
        if checkout.join("yarn.lock").exists() {
            steps.extend_from_slice(YARN_STEPS);
        } else {
            steps.extend_from_slice(NPM_STEPS);
        }
    }

    if checkout.join("requirements.txt").exists() {
        steps.extend_from_slice(PIP_STEPS);
    }

    if checkout.join("Cargo.toml").exists() {
        steps.extend_from_slice(CARGO_STEPS);
    }

    steps
}

/// Executes external warm-up commands. A trait seam so the sync engine can be
/// tested without running package managers.
pub trait CommandRunner: Send + Sync {
    /// Run `program args...` with `cwd` as working directory, returning
    /// [`Error::WarmUp`] on a nonzero exit.
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()>;
}

/// The default runner, spawning real processes and capturing combined output.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
        let command_line = if args.is_empty() {
            program.to_string()
        } else {
            format!("{} {}", program, args.join(" "))
        };

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .output()
            .map_err(|e| Error::WarmUp {
                command: command_line.clone(),
                dir: cwd.display().to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).trim().to_string();
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                if !combined.is_empty() {
                    combined.push('\n');
                }
                combined.push_str(stderr.trim());
            }
            return Err(Error::WarmUp {
                command: command_line,
                dir: cwd.display().to_string(),
                message: format!("{}: {}", output.status, combined),
            });
        }

        Ok(())
    }
}

/// Run the detected warm-up sequence for `checkout`. The first failing
/// command aborts the rest of the sequence.
pub fn warm_up(checkout: &Path, runner: &dyn CommandRunner) -> Result<()> {
    for step in detect_steps(checkout) {
        info!(
            "warm-up: running `{}` in {}",
            step.command_line(),
            checkout.display()
        );
        runner.run(step.program, step.args, checkout)?;
    }
    Ok(())
}
