//! Discover command implementation
//!
//! Scans a directory tree for existing git checkouts and writes the manifest
//! that would reproduce them, grouped by remote prefix and containing
//! directory. The manifest lands in a timestamp-named file so prior output is
//! never overwritten; `--dry-run` prints it to stdout instead.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use chrono::Local;
use console::Style;

use repo_fleet::discovery;
use repo_fleet::git::SystemGit;
use repo_fleet::manifest;
use repo_fleet::output::OutputConfig;
use repo_fleet::report::{report_file_name, DiscoveryReport};

/// Arguments for the discover command
#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Directory to scan for existing checkouts
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Print the generated manifest to stdout instead of writing a file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

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

/// Execute the `discover` command.
pub fn execute(args: DiscoverArgs, color: &str) -> Result<()> {
    let output = OutputConfig::new(color, args.quiet, args.verbose);
    let git = SystemGit;

    let root = args
        .dir
        .canonicalize()
        .with_context(|| format!("cannot scan {}", args.dir.display()))?;

    if output.verbose && !output.quiet {
        println!("Scanning {}", root.display());
    }

    let mut report = DiscoveryReport::new();
    let generated = discovery::discover(&root, &git, &mut report)?;

    let now = Local::now();
    let rendered = manifest::render_generated(&generated, &root, &now)?;

    if args.dry_run {
        print!("{rendered}");
    } else {
        let file_name = manifest::generated_file_name(&now);
        manifest::write_atomically(Path::new(&file_name), &rendered)
            .with_context(|| format!("cannot write generated manifest {file_name}"))?;
        if !output.quiet {
            println!(
                "{} {}",
                output.styled("Manifest saved to", Style::new().green()),
                file_name
            );
        }
    }

    if !output.quiet {
        print!("{}", report.render());
    }

    if args.report {
        let file_name = report_file_name("discover", &now);
        manifest::write_atomically(Path::new(&file_name), &report.render())?;
        if !output.quiet {
            println!("Report saved to {file_name}");
        }
    }

    Ok(())
}
