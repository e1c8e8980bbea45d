//! # Manifest Schema and Parsing
//!
//! The manifest is the declarative description of the repository fleet: a TOML
//! document with a top-level list of site tables, each naming a remote prefix,
//! a local base directory, and the repositories to keep checked out there.
//!
//! ```toml
//! [[sites]]
//! remote = "https://github.com/my-org"
//! dir = "/work/my-org"
//! warm_up_all = false
//!
//!   [[sites.repos]]
//!   repo = "service-a"
//!   rename = "a"
//!   warm_up = true
//!   memo = "primary service"
//! ```
//!
//! The schema is canonical and strict: `remote`, `dir`, `warm_up_all`, `repos`
//! on sites and `repo`, `rename`, `warm_up`, `memo` on repos. No historical
//! field aliases are accepted; unknown fields are a parse error. `warm_up` is
//! a real tri-state (`Option<bool>`) so an explicit `false` can override a
//! group-wide `warm_up_all = true`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::resolver;

/// One declared repository within a site group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RepoSpec {
    /// Repository name, e.g. `service-a` or `owner/name` (required).
    pub repo: String,
    /// Optional override for the local directory leaf name. The reserved
    /// token `{base}` resolves to the final path segment of `repo`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename: Option<String>,
    /// Per-repo warm-up override. Explicitly set values win over the group's
    /// `warm_up_all`; unset defers to it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warm_up: Option<bool>,
    /// Free-text annotation, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl RepoSpec {
    /// Full clone URL for this repository within `group`.
    pub fn url(&self, group: &SiteGroup) -> String {
        resolver::repo_url(&self.repo, &group.remote)
    }

    /// Resolved local checkout path for this repository within `group`.
    pub fn local_path(&self, group: &SiteGroup) -> PathBuf {
        resolver::local_path(&self.repo, self.rename.as_deref(), Path::new(&group.dir))
    }

    /// Name shown in reports: remote prefix joined with the repo name.
    pub fn display_name(&self, group: &SiteGroup) -> String {
        let prefix = group.remote.trim().trim_end_matches(['/', ':']);
        format!("{}/{}", prefix, self.repo.trim())
    }
}

/// A remote prefix and local base directory pairing with its repositories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SiteGroup {
    /// Remote URL prefix, e.g. `https://github.com/my-org` or `git@host:org`.
    pub remote: String,
    /// Local base directory for this group's checkouts.
    pub dir: String,
    /// Group-wide warm-up default, overridable per repo.
    #[serde(default)]
    pub warm_up_all: bool,
    /// Repositories in this group. An empty list is legal and a no-op.
    #[serde(default)]
    pub repos: Vec<RepoSpec>,
}

impl SiteGroup {
    /// A group needs a non-empty remote prefix and base directory to be
    /// reconciled; anything else cannot resolve URLs or paths.
    pub fn validate(&self) -> Result<()> {
        if self.remote.trim().is_empty() {
            return Err(Error::InvalidGroup {
                message: format!("site group with dir `{}` has an empty remote", self.dir),
            });
        }
        if self.dir.trim().is_empty() {
            return Err(Error::InvalidGroup {
                message: format!("site group `{}` has an empty dir", self.remote),
            });
        }
        Ok(())
    }
}

/// Top-level manifest: an ordered sequence of site groups.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub sites: Vec<SiteGroup>,
}

/// Load and parse a manifest file.
///
/// Read and parse failures are scoped to this one file; callers processing
/// several manifests log the error and continue with the rest.
pub fn from_file(path: &Path) -> Result<Manifest> {
    let content = fs::read_to_string(path).map_err(|e| Error::ManifestRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse(&content).map_err(|e| match e {
        Error::ManifestParse { message, .. } => Error::ManifestParse {
            path: path.display().to_string(),
            message,
        },
        other => other,
    })
}

/// Parse a manifest from a TOML string.
pub fn parse(content: &str) -> Result<Manifest> {
    toml::from_str(content).map_err(|e| Error::ManifestParse {
        path: "<string>".to_string(),
        message: e.to_string(),
    })
}

/// Render a generated manifest as TOML with a provenance header.
pub fn render_generated(manifest: &Manifest, root: &Path, now: &DateTime<Local>) -> Result<String> {
    let body = toml::to_string_pretty(manifest).map_err(|e| Error::ManifestEncode {
        message: e.to_string(),
    })?;
    Ok(format!(
        "# Generated by repo-fleet discover\n# Generated at: {}\n# Root directory: {}\n\n{}",
        now.to_rfc3339(),
        root.display(),
        body
    ))
}

/// Timestamp-derived filename for a generated manifest, so prior output is
/// never overwritten.
pub fn generated_file_name(now: &DateTime<Local>) -> String {
    format!("{}_manifest.toml", now.format("%Y%m%d-%H%M%S"))
}

/// Write `content` to `path`, staging through a temporary file so a failed
/// write never leaves a truncated manifest behind.
pub fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
