//! # CLI Command Implementations
//!
//! One module per subcommand. Each defines a clap `Args` struct and an
//! `execute` function that builds the explicit option/output configuration
//! and calls into the `repo_fleet` library.

pub mod discover;
pub mod sync;
