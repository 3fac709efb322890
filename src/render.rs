//! Operator-facing text output.

use colored::Colorize;
use humansize::{format_size, BINARY};
use std::io::{self, Write};

use crate::analysis::summary::RootSummary;
use crate::backup::{BackupReport, RootStatus};
use crate::deletion::{DeletionReport, DeletionStatus};
use crate::scanner::ScannedFile;
use crate::selection::DeletionSet;
use crate::working_set::WorkingSet;

const RULE: &str = "==================================================";

pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, BINARY)
}

pub fn banner<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}\n{}\n{}", RULE, title.bold(), RULE)
}

fn row<W: Write>(out: &mut W, label: String, bytes: u64, path: &str) -> io::Result<()> {
    writeln!(out, "{:>4}. [{:>11}] {}", label, format_bytes(bytes), path)
}

pub fn render_files<W: Write>(out: &mut W, files: &[ScannedFile]) -> io::Result<()> {
    for (i, file) in files.iter().enumerate() {
        row(out, format!("F{}", i + 1), file.size_bytes, &file.path.to_string_lossy())?;
    }
    Ok(())
}

/// Full listing of both working lists.
pub fn render_listing<W: Write>(out: &mut W, working: &WorkingSet) -> io::Result<()> {
    writeln!(out, "{}", format!("Large files ({})", working.files.len()).cyan())?;
    if working.files.is_empty() {
        writeln!(out, "   (none)")?;
    }
    render_files(out, &working.files)?;

    writeln!(
        out,
        "{}",
        format!("Large directories ({})", working.directories.len()).cyan()
    )?;
    if working.directories.is_empty() {
        writeln!(out, "   (none)")?;
    }
    for (i, dir) in working.directories.iter().enumerate() {
        row(
            out,
            format!("D{}", i + 1),
            dir.cumulative_size_bytes,
            &dir.path.to_string_lossy(),
        )?;
    }
    Ok(())
}

pub fn render_cleanup_help<W: Write>(out: &mut W, done_token: &str) -> io::Result<()> {
    writeln!(out, "\n------------------------------")?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  F3, D1          delete a listed file or directory")?;
    writeln!(out, "  F2-F5, D1-3     delete a range")?;
    writeln!(out, "  .dmg .iso       delete every listed file with that extension")?;
    writeln!(out, "  {:<15} finish this step", done_token)?;
    writeln!(out, "------------------------------")
}

pub fn render_targets<W: Write>(out: &mut W, set: &DeletionSet) -> io::Result<()> {
    writeln!(
        out,
        "\n{} Targeting {} item(s), {} total, for immediate deletion:",
        "!".yellow().bold(),
        set.len(),
        format_bytes(set.total_bytes())
    )?;
    for entry in set.entries() {
        writeln!(out, "   - {:<4} {}", entry.label(), entry.path.display())?;
    }
    Ok(())
}

pub fn render_deletion_report<W: Write>(out: &mut W, report: &DeletionReport) -> io::Result<()> {
    for outcome in &report.outcomes {
        let path = outcome.entry.path.display();
        match &outcome.status {
            DeletionStatus::Removed => writeln!(out, "{} Deleted: {}", "✓".green(), path)?,
            DeletionStatus::Missing => writeln!(out, "- Already gone: {}", path)?,
            DeletionStatus::Failed(e) => {
                writeln!(out, "{} Error deleting {}: {}", "✗".red(), path, e)?
            }
        }
    }
    writeln!(
        out,
        "Freed {} ({} removed, {} failed).",
        format_bytes(report.freed_bytes()),
        report.removed(),
        report.failed()
    )
}

pub fn render_backup_report<W: Write>(out: &mut W, report: &BackupReport) -> io::Result<()> {
    for outcome in &report.outcomes {
        let status = match &outcome.status {
            RootStatus::Synced => "synced".green().to_string(),
            RootStatus::Skipped => "skipped (missing)".yellow().to_string(),
            RootStatus::Failed(e) => format!("{} ({})", "failed".red(), e),
        };
        writeln!(
            out,
            "  {} -> {}: {}",
            outcome.root.display(),
            outcome.destination.display(),
            status
        )?;
    }
    let elapsed = report.finished_at - report.started_at;
    writeln!(
        out,
        "Backup finished at {} in {}s: {} synced, {} failed.",
        report.finished_at.format("%Y-%m-%d %H:%M:%S"),
        elapsed.num_seconds(),
        report.synced(),
        report.failed()
    )
}

pub fn render_root_summary<W: Write>(out: &mut W, summaries: &[RootSummary]) -> io::Result<()> {
    for summary in summaries {
        writeln!(
            out,
            "  {:<40} {:>4} file(s) {:>11}",
            summary.root.display().to_string(),
            summary.file_count,
            format_bytes(summary.total_bytes)
        )?;
    }
    Ok(())
}
