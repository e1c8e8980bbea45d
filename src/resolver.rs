//! # URL and Path Resolution
//!
//! Pure string transforms between a `(remote prefix, repo name)` pair and a
//! full clone URL or local checkout path, plus the inverse extractions used by
//! discovery. Two URL shapes are understood:
//!
//! - **Network URLs** (`https://host/org`, `ssh://git@host/org`): detected via
//!   the `url` crate (a parseable URL with a host). Prefix and name are joined
//!   with `/`.
//! - **SSH shorthand** (`git@host:org`): detected by the presence of `@` and
//!   `:`. The name is joined onto whatever separator the prefix already ends
//!   with, inserting `/` (or `:` when the prefix stops at the host) otherwise.
//!
//! Canonical segment rule: the repository name is always the final path
//! segment of a URL; the prefix is everything before it. Multi-segment repo
//! names in a manifest are appended whole on the construction side.

use std::path::{Path, PathBuf};

use log::warn;
use url::Url;

/// Reserved `rename` token meaning "use the final path segment of the repo
/// name" (matched case-insensitively).
pub const BASE_NAME_PLACEHOLDER: &str = "{base}";

/// Returns true if `s` parses as a network URL with a scheme and host.
pub fn is_network_url(s: &str) -> bool {
    match Url::parse(s) {
        Ok(u) => u.host_str().is_some(),
        Err(_) => false,
    }
}

fn ensure_trailing_slash(s: &str) -> String {
    if s.ends_with('/') {
        s.to_string()
    } else {
        format!("{s}/")
    }
}

/// Final path segment of a repo name (`org/team/project` -> `project`).
fn base_segment(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Construct the full clone URL for a repository.
///
/// Both components are trimmed first. The `.git` suffix is appended unless the
/// name already carries one, and no separator is doubled.
pub fn repo_url(repo_name: &str, remote_prefix: &str) -> String {
    let name = repo_name.trim();
    let prefix = remote_prefix.trim();

    let suffixed = if name.ends_with(".git") {
        name.to_string()
    } else {
        format!("{name}.git")
    };

    if is_network_url(prefix) {
        return format!("{}{}", ensure_trailing_slash(prefix), suffixed);
    }

    if prefix.contains('@') {
        if prefix.ends_with(':') || prefix.ends_with('/') {
            return format!("{prefix}{suffixed}");
        }
        // "git@host:org" gets a path separator, "git@host" the host separator
        if prefix.contains(':') {
            return format!("{prefix}/{suffixed}");
        }
        return format!("{prefix}:{suffixed}");
    }

    // Unknown prefix shape: concatenate as-is
    format!("{prefix}{suffixed}")
}

/// Resolve the local checkout path for a repository.
///
/// `rename`, when set and non-empty, overrides the directory leaf; the
/// [`BASE_NAME_PLACEHOLDER`] token resolves to the final path segment of the
/// repo name. Without a rename the leaf is the final path segment (the whole
/// name when it has no separator).
pub fn local_path(repo_name: &str, rename: Option<&str>, local_dir: &Path) -> PathBuf {
    let name = repo_name.trim();
    let leaf = match rename.map(str::trim) {
        Some(r) if !r.is_empty() => {
            if r.eq_ignore_ascii_case(BASE_NAME_PLACEHOLDER) {
                base_segment(name)
            } else {
                r
            }
        }
        _ => base_segment(name),
    };
    local_dir.join(leaf)
}

/// Byte offset at which a URL splits into prefix and name, if any.
fn split_point(url: &str) -> Option<usize> {
    if is_network_url(url) {
        // Only slashes after the "scheme://" authority separator count
        let authority = url.find("://").map(|i| i + 3).unwrap_or(0);
        return url.rfind('/').filter(|&i| i > authority);
    }

    if url.contains('@') && url.contains(':') {
        let last_slash = url.rfind('/');
        let last_colon = url.rfind(':');
        return last_slash.max(last_colon);
    }

    None
}

/// Extract the repository name (final path segment, minus `.git`) from a URL.
pub fn extract_repo_name(url: &str) -> String {
    let url = url.trim();
    let stripped = url.strip_suffix(".git").unwrap_or(url);

    match split_point(stripped) {
        Some(i) => stripped[i + 1..].to_string(),
        None => stripped.to_string(),
    }
}

/// Extract the remote prefix (everything before the final path segment) from
/// a URL. Unknown shapes fall back to the whole URL.
pub fn extract_remote_prefix(url: &str) -> String {
    let url = url.trim();
    let stripped = url.strip_suffix(".git").unwrap_or(url);

    match split_point(stripped) {
        Some(i) => stripped[..i].to_string(),
        None => {
            warn!("Unknown URL shape, using full origin as prefix: {url}");
            stripped.to_string()
        }
    }
}
