//! # Repository Fleet Synchronization
//!
//! This library reconciles a declared set of source-controlled repositories
//! against a local filesystem. Given a manifest of remote locations and
//! repository names, it clones what is missing, updates what exists, and can
//! prime fresh checkouts for development by running per-project-type warm-up
//! commands. The companion direction, discovery, scans a filesystem tree for
//! existing checkouts and synthesizes the manifest that would reproduce them.
//!
//! ## Core Concepts
//!
//! - **Manifest (`manifest`)**: the declarative TOML description of the
//!   fleet: site groups (remote prefix + local base directory) containing
//!   repository specs.
//! - **Resolution (`resolver`)**: pure transforms between a
//!   `(prefix, name)` pair and a clone URL or checkout path, plus the
//!   inverse extractions used by discovery.
//! - **Reconciliation (`sync`)**: the clone-or-update engine, fanning out
//!   across a worker pool per site group and aggregating outcomes.
//! - **Warm-up (`warmup`)**: per-project-type dependency priming with
//!   three-tier enablement precedence.
//! - **Discovery (`discovery`)**: the inverse direction, walking a tree and
//!   grouping live checkouts back into a manifest.
//! - **Reports (`report`)**: append-only timestamped outcome records with
//!   human-readable rendering.
//!
//! External processes (git, package managers) sit behind the
//! [`git::GitOperations`] and [`warmup::CommandRunner`] traits so every
//! pipeline can be exercised without spawning them.

pub mod discovery;
pub mod error;
pub mod git;
pub mod manifest;
pub mod output;
pub mod report;
pub mod resolver;
pub mod sync;
pub mod warmup;

#[cfg(test)]
mod resolver_proptest;
