//! # Reconciliation Engine
//!
//! Drives the clone-or-update decision for every declared repository and
//! dispatches warm-up on success. Each repository in a site group is an
//! independent task: one failure never prevents, delays, or alters another
//! repository's outcome. Groups are processed sequentially with a join
//! barrier between them; within a group, repositories fan out across a rayon
//! worker pool and their outcomes are collected behind a mutex.
//!
//! The pool is bounded by default (rayon's CPU-sized pool, or an explicit
//! `--jobs N`). One-worker-per-repository fan-out is an explicit opt-in via
//! `jobs = Some(0)` to avoid resource exhaustion on large manifests. No
//! deadline or cancellation is threaded through the blocking git and warm-up
//! calls; a hung external command hangs its task.

use std::sync::Mutex;
use std::time::Instant;

use chrono::Local;
use log::{error, info, warn};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::git::GitOperations;
use crate::manifest::{Manifest, RepoSpec, SiteGroup};
use crate::report::{SyncRecord, SyncReport};
use crate::warmup::{self, CommandRunner};

/// Per-invocation settings for the reconciliation engine.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Resolve and report planned actions without touching git or warm-up.
    pub dry_run: bool,
    /// Worker pool size per site group. `None` uses rayon's CPU-sized
    /// default, `Some(0)` opts into one worker per repository, `Some(n)`
    /// uses exactly `n` workers.
    pub jobs: Option<usize>,
}

/// Reconcile every site group of `manifest`, appending one outcome record per
/// declared repository to `report`.
///
/// An invalid group (empty remote or dir) is logged and skipped; remaining
/// groups still run. All repositories of group N finish before group N+1
/// begins.
pub fn sync_manifest(
    manifest: &Manifest,
    git: &dyn GitOperations,
    runner: &dyn CommandRunner,
    opts: &SyncOptions,
    report: &mut SyncReport,
) -> Result<()> {
    for group in &manifest.sites {
        if let Err(e) = group.validate() {
            error!("Skipping site group: {e}");
            continue;
        }
        info!("Processing site group: {}", group.remote);
        report.extend(sync_group(group, git, runner, opts)?);
    }
    Ok(())
}

/// Reconcile all repositories of one site group concurrently, blocking until
/// every repository has finished.
pub fn sync_group(
    group: &SiteGroup,
    git: &dyn GitOperations,
    runner: &dyn CommandRunner,
    opts: &SyncOptions,
) -> Result<Vec<SyncRecord>> {
    if group.repos.is_empty() {
        return Ok(Vec::new());
    }

    let workers = match opts.jobs {
        Some(0) => group.repos.len(),
        Some(n) => n,
        // 0 tells rayon to size the pool from the CPU count
        None => 0,
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| Error::WorkerPool {
            message: e.to_string(),
        })?;

    let records: Mutex<Vec<SyncRecord>> = Mutex::new(Vec::with_capacity(group.repos.len()));
    pool.install(|| {
        group.repos.par_iter().for_each(|repo| {
            let record = sync_repo(repo, group, git, runner, opts);
            records.lock().unwrap().push(record);
        });
    });

    Ok(records.into_inner().unwrap())
}

/// Reconcile one repository: clone it when its resolved path is absent, pull
/// when present, then dispatch warm-up on success.
fn sync_repo(
    repo: &RepoSpec,
    group: &SiteGroup,
    git: &dyn GitOperations,
    runner: &dyn CommandRunner,
    opts: &SyncOptions,
) -> SyncRecord {
    let time = Local::now();
    let start = Instant::now();
    let display = repo.display_name(group);

    if repo.repo.trim().is_empty() {
        return SyncRecord {
            time,
            repository: display,
            duration: start.elapsed(),
            success: false,
            error: "repo name is empty".to_string(),
            memo: memo_base(repo),
        };
    }

    let url = repo.url(group);
    let target = repo.local_path(group);
    // Presence test only; the path is not validated against the declared
    // origin
    let exists = target.exists();

    if opts.dry_run {
        let memo = if exists {
            format!("dry-run: would update {}", target.display())
        } else {
            format!("dry-run: would clone {} into {}", url, target.display())
        };
        return SyncRecord {
            time,
            repository: display,
            duration: start.elapsed(),
            success: true,
            error: String::new(),
            memo: annotate(&memo_base(repo), &memo),
        };
    }

    let result = if exists {
        info!("Updating {} in {}", display, target.display());
        git.pull(&target)
    } else {
        info!("Cloning {} into {}", url, target.display());
        git.clone_repo(&url, &target)
    };

    if let Err(e) = result {
        let action = if exists { "update" } else { "clone" };
        return SyncRecord {
            time,
            repository: display,
            duration: start.elapsed(),
            success: false,
            error: e.to_string(),
            memo: annotate(&memo_base(repo), &format!("{action} failed")),
        };
    }

    // Warm-up runs only after a successful clone/update and is best-effort:
    // its failure annotates the memo but never fails the outcome
    let mut memo = memo_base(repo);
    if warmup::should_warm_up(repo, group) {
        match warmup::warm_up(&target, runner) {
            Ok(()) => memo = annotate(&memo, "warm-up ok"),
            Err(e) => {
                warn!("Warm-up failed for {display}: {e}");
                memo = annotate(&memo, &format!("warm-up failed: {e}"));
            }
        }
    }

    SyncRecord {
        time,
        repository: display,
        duration: start.elapsed(),
        success: true,
        error: String::new(),
        memo,
    }
}

fn memo_base(repo: &RepoSpec) -> String {
    repo.memo.clone().unwrap_or_default()
}

fn annotate(base: &str, note: &str) -> String {
    if base.is_empty() {
        note.to_string()
    } else {
        format!("{base}; {note}")
    }
}
