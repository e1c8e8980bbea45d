//! # Error Handling
//!
//! Centralized error type for repo-fleet, built with `thiserror`. Errors are
//! grouped by the unit of work they fail: a manifest file, a single repository
//! operation, a discovered directory, or a warm-up command. Errors from
//! independent units never propagate past that unit; callers log them and
//! continue with the remaining work. Only failures with no unit of isolation
//! (cannot build a worker pool, cannot write final output) abort an action.

use thiserror::Error;

/// Main error type for repo-fleet operations
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest file could not be read from disk.
    #[error("Failed to read manifest {path}: {message}")]
    ManifestRead { path: String, message: String },

    /// The manifest file is not valid TOML or does not match the schema.
    #[error("Failed to parse manifest {path}: {message}")]
    ManifestParse { path: String, message: String },

    /// A generated manifest could not be encoded as TOML.
    #[error("Failed to encode manifest: {message}")]
    ManifestEncode { message: String },

    /// A site group is missing a required field and cannot be reconciled.
    #[error("Invalid site group: {message}")]
    InvalidGroup { message: String },

    /// An external git operation (clone, pull, status query) failed.
    ///
    /// `target` is the URL or local path the operation was applied to, so the
    /// failure is attributable to a specific repository in the report.
    #[error("Git {operation} failed for {target}: {stderr}")]
    GitOperation {
        operation: String,
        target: String,
        stderr: String,
    },

    /// A candidate directory could not be queried for git metadata.
    #[error("Failed to query repository at {path}: {message}")]
    Discovery { path: String, message: String },

    /// A warm-up command exited nonzero or could not be started.
    ///
    /// Always downgraded to a warning annotation on the owning outcome.
    #[error("Warm-up command `{command}` failed in {dir}: {message}")]
    WarmUp {
        command: String,
        dir: String,
        message: String,
    },

    /// A discovery root yielded no repositories with a configured origin.
    #[error("No repositories with a configured origin found under {root}")]
    DiscoveryEmpty { root: String },

    /// The worker pool for a site group could not be constructed.
    #[error("Failed to build worker pool: {message}")]
    WorkerPool { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
