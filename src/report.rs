//! # Report Aggregation
//!
//! Two independently-shaped, append-only reports share one pattern here:
//! timestamped records collected while an action runs, rendered on demand
//! into a human-readable summary. [`SyncReport`] records reconciliation
//! outcomes (one per declared repository); [`DiscoveryReport`] records what
//! the scanner found on disk. Both render an explicit "no activity" line for
//! the empty case instead of an empty body.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Local};

/// Outcome of reconciling one declared repository.
#[derive(Debug, Clone)]
pub struct SyncRecord {
    /// When processing of this repository started.
    pub time: DateTime<Local>,
    /// Display name (remote prefix joined with the repo name).
    pub repository: String,
    /// Wall-clock time spent on this repository.
    pub duration: Duration,
    pub success: bool,
    /// Error text when `success` is false, empty otherwise.
    pub error: String,
    /// The spec's memo, possibly annotated with the warm-up result.
    pub memo: String,
}

/// Append-only collection of reconciliation outcomes.
#[derive(Debug, Default)]
pub struct SyncReport {
    records: Vec<SyncRecord>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: SyncRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: Vec<SyncRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[SyncRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.records.iter().filter(|r| !r.success).count()
    }

    /// Render the report as a human-readable summary.
    pub fn render(&self) -> String {
        if self.records.is_empty() {
            return "Sync report: no repositories were processed.\n".to_string();
        }

        let total = self.records.len();
        let failed = self.failure_count();
        let elapsed: Duration = self.records.iter().map(|r| r.duration).sum();

        let mut out = String::new();
        let _ = writeln!(
            out,
            "Sync report: {} repositories, {} succeeded, {} failed",
            total,
            total - failed,
            failed
        );
        for r in &self.records {
            let status = if r.success { "ok" } else { "failed" };
            let _ = write!(
                out,
                "{} | repo: {} | duration: {:.2}s | {}",
                r.time.format("%Y-%m-%d %H:%M:%S"),
                r.repository,
                r.duration.as_secs_f64(),
                status
            );
            if !r.error.is_empty() {
                let _ = write!(out, " | error: {}", r.error);
            }
            if !r.memo.is_empty() {
                let _ = write!(out, " | memo: {}", r.memo);
            }
            out.push('\n');
        }
        let _ = writeln!(out, "Total duration: {:.2}s", elapsed.as_secs_f64());
        out
    }
}

/// What the discovery scanner learned about one checkout.
#[derive(Debug, Clone)]
pub struct DiscoveryRecord {
    pub time: DateTime<Local>,
    pub path: PathBuf,
    /// Configured origin URL, empty when none.
    pub origin: String,
    pub has_origin: bool,
    pub uncommitted: bool,
    pub unmerged: bool,
}

/// Append-only collection of discovery results.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    records: Vec<DiscoveryRecord>,
}

impl DiscoveryReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: DiscoveryRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[DiscoveryRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render the report as a human-readable summary.
    pub fn render(&self) -> String {
        if self.records.is_empty() {
            return "Discovery report: no repositories were found.\n".to_string();
        }

        let with_origin = self.records.iter().filter(|r| r.has_origin).count();
        let uncommitted = self.records.iter().filter(|r| r.uncommitted).count();
        let unmerged = self.records.iter().filter(|r| r.unmerged).count();

        let mut out = String::new();
        let _ = writeln!(
            out,
            "Discovery report: {} repositories, {} with origin, {} uncommitted, {} unmerged",
            self.records.len(),
            with_origin,
            uncommitted,
            unmerged
        );
        for r in &self.records {
            let origin = if r.has_origin { r.origin.as_str() } else { "<none>" };
            let _ = writeln!(
                out,
                "{} | path: {} | origin: {} | uncommitted: {} | unmerged: {}",
                r.time.format("%Y-%m-%d %H:%M:%S"),
                r.path.display(),
                origin,
                r.uncommitted,
                r.unmerged
            );
        }
        out
    }
}

/// Timestamp-derived filename for a written report, so prior output is never
/// overwritten.
pub fn report_file_name(action: &str, now: &DateTime<Local>) -> String {
    format!("{}_{}_report.log", now.format("%Y%m%d-%H%M%S"), action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, success: bool, memo: &str) -> SyncRecord {
        SyncRecord {
            time: Local::now(),
            repository: name.to_string(),
            duration: Duration::from_millis(1500),
            success,
            error: if success { String::new() } else { "boom".to_string() },
            memo: memo.to_string(),
        }
    }

    #[test]
    fn test_empty_sync_report_renders_labeled_line() {
        let report = SyncReport::new();
        let rendered = report.render();
        assert!(!rendered.is_empty());
        assert!(rendered.contains("no repositories were processed"));
    }

    #[test]
    fn test_sync_report_counts_and_details() {
        let mut report = SyncReport::new();
        report.push(record("org/a", true, "warm-up ok"));
        report.push(record("org/b", false, ""));
        report.push(record("org/c", true, ""));

        let rendered = report.render();
        assert!(rendered.contains("3 repositories, 2 succeeded, 1 failed"));
        assert!(rendered.contains("repo: org/a"));
        assert!(rendered.contains("memo: warm-up ok"));
        assert!(rendered.contains("error: boom"));
        assert!(rendered.contains("Total duration: 4.50s"));
    }

    #[test]
    fn test_empty_discovery_report_renders_labeled_line() {
        let report = DiscoveryReport::new();
        let rendered = report.render();
        assert!(!rendered.is_empty());
        assert!(rendered.contains("no repositories were found"));
    }

    #[test]
    fn test_discovery_report_counts() {
        let mut report = DiscoveryReport::new();
        report.push(DiscoveryRecord {
            time: Local::now(),
            path: PathBuf::from("/work/a"),
            origin: "git@host:org/a.git".to_string(),
            has_origin: true,
            uncommitted: true,
            unmerged: true,
        });
        report.push(DiscoveryRecord {
            time: Local::now(),
            path: PathBuf::from("/work/b"),
            origin: String::new(),
            has_origin: false,
            uncommitted: false,
            unmerged: false,
        });

        let rendered = report.render();
        assert!(rendered.contains("2 repositories, 1 with origin, 1 uncommitted, 1 unmerged"));
        assert!(rendered.contains("origin: <none>"));
        assert!(rendered.contains("/work/a"));
    }

    #[test]
    fn test_report_file_name_shape() {
        let name = report_file_name("sync", &Local::now());
        assert!(name.ends_with("_sync_report.log"));
    }
}
