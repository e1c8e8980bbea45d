//! # Discovery Scanner
//!
//! The inverse of reconciliation: walk a filesystem tree, find existing git
//! checkouts, and synthesize the manifest that would reproduce them.
//!
//! A directory containing a `.git` entry (directory or file) is a checkout
//! and is treated as an atomic unit: the walk records it and does not descend
//! into its subtree. Checkouts without a configured origin are recorded in
//! the discovery report but dropped from the generated manifest, since there
//! is nothing to declare without a source.
//!
//! Grouping key is `(remote prefix of origin, containing directory)`; every
//! checkout sharing a key becomes one repo entry in that site group. When the
//! generic naming rule would not place a checkout where it was actually
//! found, an explicit `rename` is synthesized so re-applying the manifest
//! reproduces the scanned layout exactly.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::{info, warn};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::git::GitOperations;
use crate::manifest::{Manifest, RepoSpec, SiteGroup};
use crate::report::{DiscoveryRecord, DiscoveryReport};
use crate::resolver;

/// What the scanner learned about one checkout. Produced and consumed within
/// a single walk; never persisted.
#[derive(Debug, Clone)]
pub struct DiscoveredRepo {
    pub path: PathBuf,
    /// Configured origin URL, empty when none.
    pub origin: String,
    pub has_origin: bool,
    pub uncommitted: bool,
    pub unmerged: bool,
}

/// Walk `root` depth-first and probe every checkout found.
///
/// A checkout that cannot be queried is logged and skipped; the walk
/// continues with the rest of the tree.
pub fn scan(
    root: &Path,
    git: &dyn GitOperations,
    report: &mut DiscoveryReport,
) -> Result<Vec<DiscoveredRepo>> {
    let mut results = Vec::new();

    let mut walker = WalkDir::new(root).into_iter();
    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Error accessing path during scan: {e}");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        // A .git file (worktree, submodule) marks a checkout too
        if !path.join(".git").exists() {
            continue;
        }

        // A checkout is an atomic unit: never descend into its subtree
        walker.skip_current_dir();

        match probe(path, git) {
            Ok(found) => {
                info!("Discovered repository: {}", path.display());
                report.push(DiscoveryRecord {
                    time: Local::now(),
                    path: found.path.clone(),
                    origin: found.origin.clone(),
                    has_origin: found.has_origin,
                    uncommitted: found.uncommitted,
                    unmerged: found.unmerged,
                });
                results.push(found);
            }
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
            }
        }
    }

    Ok(results)
}

/// Query origin and working-tree state for one checkout.
fn probe(path: &Path, git: &dyn GitOperations) -> Result<DiscoveredRepo> {
    let origin = git.origin_url(path).map_err(|e| Error::Discovery {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    // Status probes failing is not fatal for the checkout; the flags just
    // stay unset
    let uncommitted = git.has_uncommitted(path).unwrap_or_else(|e| {
        warn!("Failed to check working tree of {}: {e}", path.display());
        false
    });
    let unmerged = git.has_unpublished(path).unwrap_or_else(|e| {
        warn!("Failed to check upstream state of {}: {e}", path.display());
        false
    });

    Ok(DiscoveredRepo {
        path: path.to_path_buf(),
        has_origin: origin.is_some(),
        origin: origin.unwrap_or_default(),
        uncommitted,
        unmerged,
    })
}

/// Single-slot status memo: unpublished commits outrank uncommitted changes.
pub fn status_memo(uncommitted: bool, unmerged: bool) -> Option<String> {
    if unmerged {
        Some("unmerged".to_string())
    } else if uncommitted {
        Some("uncommitted".to_string())
    } else {
        None
    }
}

/// Group scan results into a manifest.
///
/// Output is deterministic: groups are ordered by `(remote, dir)` and repos
/// by name within each group.
pub fn build_manifest(results: &[DiscoveredRepo]) -> Manifest {
    let mut table: BTreeMap<(String, String), SiteGroup> = BTreeMap::new();

    for found in results {
        if !found.has_origin {
            warn!(
                "Skipping repository without origin: {}",
                found.path.display()
            );
            continue;
        }

        let remote = resolver::extract_remote_prefix(&found.origin);
        let name = resolver::extract_repo_name(&found.origin);
        let parent = found
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| found.path.clone());
        let dir = parent.display().to_string();

        // Pin the on-disk leaf name when the generic rule would not
        // reproduce it
        let rename = if resolver::local_path(&name, None, &parent) == found.path {
            None
        } else {
            found
                .path
                .file_name()
                .map(|leaf| leaf.to_string_lossy().into_owned())
        };

        let spec = RepoSpec {
            repo: name,
            rename,
            warm_up: None,
            memo: status_memo(found.uncommitted, found.unmerged),
        };

        table
            .entry((remote.clone(), dir.clone()))
            .or_insert_with(|| SiteGroup {
                remote,
                dir,
                warm_up_all: false,
                repos: Vec::new(),
            })
            .repos
            .push(spec);
    }

    let mut sites: Vec<SiteGroup> = table.into_values().collect();
    for site in &mut sites {
        site.repos.sort_by(|a, b| a.repo.cmp(&b.repo));
    }
    Manifest { sites }
}

/// Scan `root` and synthesize the manifest that reproduces it.
///
/// A root yielding no origin-bearing repositories is a terminal failure:
/// there is nothing useful to emit.
pub fn discover(
    root: &Path,
    git: &dyn GitOperations,
    report: &mut DiscoveryReport,
) -> Result<Manifest> {
    let results = scan(root, git, report)?;
    if !results.iter().any(|r| r.has_origin) {
        return Err(Error::DiscoveryEmpty {
            root: root.display().to_string(),
        });
    }
    Ok(build_manifest(&results))
}
