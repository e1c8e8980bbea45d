//! Sync command implementation
//!
//! Reconciles one or more manifest files against the local filesystem:
//! missing repositories are cloned, existing ones are updated, and warm-up
//! runs where the manifest opts in. A manifest file that fails to load is
//! reported and skipped; the remaining files still run.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use chrono::Local;
use console::Style;

use repo_fleet::git::SystemGit;
use repo_fleet::manifest;
use repo_fleet::output::OutputConfig;
use repo_fleet::report::{report_file_name, SyncReport};
use repo_fleet::sync::{sync_manifest, SyncOptions};
use repo_fleet::warmup::SystemRunner;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Manifest files to reconcile
    #[arg(required = true, value_name = "MANIFEST")]
    pub manifests: Vec<PathBuf>,

    /// Show what would be done without making changes
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Worker pool size per site group (0 = one worker per repository)
    #[arg(short, long, value_name = "N", env = "REPO_FLEET_JOBS")]
    pub jobs: Option<usize>,

    /// Show detailed progress information
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Write the rendered report to a timestamped log file
    #[arg(long)]
    pub report: bool,
}

/// Execute the `sync` command.
pub fn execute(args: SyncArgs, color: &str) -> Result<()> {
    let output = OutputConfig::new(color, args.quiet, args.verbose);
    let opts = SyncOptions {
        dry_run: args.dry_run,
        jobs: args.jobs,
    };
    let git = SystemGit;
    let runner = SystemRunner;

    if !output.quiet && args.dry_run {
        println!("Dry run: no repositories will be touched");
    }

    let mut report = SyncReport::new();
    let mut loaded = 0usize;
    for path in &args.manifests {
        let parsed = match manifest::from_file(path) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("{}", output.styled(&format!("{e}"), Style::new().red()));
                continue;
            }
        };
        loaded += 1;

        if output.verbose && !output.quiet {
            println!("Processing manifest: {}", path.display());
        }
        sync_manifest(&parsed, &git, &runner, &opts, &mut report)?;
    }

    if loaded == 0 {
        anyhow::bail!("none of the supplied manifest files could be loaded");
    }

    if !output.quiet {
        print!("{}", report.render());
    }

    if args.report {
        let file_name = report_file_name("sync", &Local::now());
        manifest::write_atomically(std::path::Path::new(&file_name), &report.render())?;
        if !output.quiet {
            println!("Report saved to {file_name}");
        }
    }

    let failed = report.failure_count();
    if failed > 0 {
        anyhow::bail!("{failed} repositories failed; see report above");
    }
    Ok(())
}
