//! The interactive run: pre-backup cleanup, backup, post-backup cleanup.

use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

use crate::analysis::summary::summarize_by_root;
use crate::backup::{ensure_mounted, BackupOrchestrator, BackupReport, Transfer};
use crate::config::AppConfig;
use crate::deletion::{execute_deletion, BatchOutcome};
use crate::platform::{FileSystem, MountProbe};
use crate::prompt::Prompter;
use crate::render;
use crate::scanner::ScannedFile;
use crate::selection::{self, DeletionSet, Selection, SelectionToken};
use crate::working_set::WorkingSet;

/// External collaborators a session talks to.
pub struct Collaborators<'a> {
    pub fs: &'a dyn FileSystem,
    pub mount: &'a dyn MountProbe,
    pub transfer: &'a dyn Transfer,
}

#[derive(Debug)]
pub struct SessionSummary {
    pub remaining: WorkingSet,
    pub items_removed: usize,
    pub backup: Option<BackupReport>,
}

pub struct Session<'a, R, W> {
    config: &'a AppConfig,
    roots: Vec<PathBuf>,
    prompter: Prompter<R, W>,
    collaborators: Collaborators<'a>,
    items_removed: usize,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        config: &'a AppConfig,
        roots: Vec<PathBuf>,
        prompter: Prompter<R, W>,
        collaborators: Collaborators<'a>,
    ) -> Self {
        Self {
            config,
            roots,
            prompter,
            collaborators,
            items_removed: 0,
        }
    }

    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    pub fn run(&mut self, mut working: WorkingSet) -> io::Result<SessionSummary> {
        if working.is_empty() {
            writeln!(self.prompter.output(), "No large files or directories found to manage.")?;
        }

        self.pre_backup_cleanup(&mut working)?;

        let mut backup = None;
        if self
            .prompter
            .confirm("\nProceed with incremental backup?", Some(false))?
        {
            backup = self.backup()?;
            if let Some(report) = &backup {
                self.post_backup_cleanup(&mut working, report)?;
            }
        } else {
            writeln!(self.prompter.output(), "Process ended.")?;
        }

        if let Some(report) = &backup {
            self.final_summary(&working, report)?;
        }

        Ok(SessionSummary {
            remaining: working,
            items_removed: self.items_removed,
            backup,
        })
    }

    /// Repeats listing, command, preview and confirmation until the operator
    /// enters the done token or nothing is left.
    pub fn pre_backup_cleanup(&mut self, working: &mut WorkingSet) -> io::Result<()> {
        loop {
            if working.is_empty() {
                writeln!(
                    self.prompter.output(),
                    "\n{}",
                    "All listed items have been processed or deleted.".green()
                )?;
                return Ok(());
            }

            let out = self.prompter.output();
            render::banner(out, "CURRENT LARGE ITEMS")?;
            render::render_listing(out, working)?;
            writeln!(out, "\nPRE-BACKUP CLEANUP")?;
            render::render_cleanup_help(out, &self.config.done_token)?;

            let Some(command) = self.prompter.ask("Command: ")? else {
                return Ok(());
            };

            match selection::select(&command, working, &self.config.done_token) {
                Selection::Done => return Ok(()),
                Selection::NoMatches => {
                    writeln!(self.prompter.output(), "{}", "No valid items selected.".yellow())?;
                }
                Selection::Items(set) => self.confirm_and_delete(&set, working)?,
            }
        }
    }

    /// Offers to free space taken by the files that were just backed up. Only
    /// files under a root whose transfer succeeded can be selected.
    pub fn post_backup_cleanup(
        &mut self,
        working: &mut WorkingSet,
        report: &BackupReport,
    ) -> io::Result<()> {
        let (backed_up, not_backed_up): (Vec<ScannedFile>, Vec<ScannedFile>) = working
            .files
            .iter()
            .cloned()
            .partition(|file| report.covers(&file.path));

        if !not_backed_up.is_empty() {
            let out = self.prompter.output();
            writeln!(
                out,
                "\n{}",
                "These files are under roots that were NOT backed up and will be kept:".yellow()
            )?;
            for file in &not_backed_up {
                writeln!(out, "   - {}", file.path.display())?;
            }
        }
        if backed_up.is_empty() {
            return Ok(());
        }

        let backed_up = WorkingSet::new(backed_up, Vec::new());
        let out = self.prompter.output();
        render::banner(out, "POST-BACKUP CLEANUP")?;
        writeln!(
            out,
            "The following files ({}) have been backed up. Remove them locally to free space?",
            render::format_bytes(backed_up.file_bytes())
        )?;
        render::render_files(out, &backed_up.files)?;
        writeln!(out, "\nOptions:")?;
        writeln!(out, "1. Delete specific files (e.g. F1, F3-F5, .dmg)")?;
        writeln!(out, "2. Delete ALL listed files")?;
        writeln!(out, "3. Skip")?;

        let Some(choice) = self.prompter.ask("\nSelect option (1-3): ")? else {
            return Ok(());
        };

        let set = match choice.trim() {
            "1" => {
                let Some(command) = self.prompter.ask("Enter items (e.g. F1, F2-F4): ")? else {
                    return Ok(());
                };
                match selection::select(&command, &backed_up, &self.config.done_token) {
                    Selection::Items(set) => set,
                    Selection::Done => return Ok(()),
                    Selection::NoMatches => {
                        writeln!(
                            self.prompter.output(),
                            "{}",
                            "No valid items selected.".yellow()
                        )?;
                        return Ok(());
                    }
                }
            }
            "2" => selection::resolve(
                &[SelectionToken::FileRange(1, backed_up.files.len())],
                &backed_up,
            ),
            _ => return Ok(()),
        };

        // Indices refer to the backed-up list; the executor falls back to the
        // path when they do not line up with `working`.
        self.confirm_and_delete(&set, working)
    }

    fn confirm_and_delete(
        &mut self,
        set: &DeletionSet,
        working: &mut WorkingSet,
    ) -> io::Result<()> {
        render::render_targets(self.prompter.output(), set)?;

        let question = format!(
            "\nConfirm deletion? (Type '{}' to delete): ",
            self.config.confirm_token
        );
        let confirmation = self.prompter.ask(&question)?.unwrap_or_default();

        match execute_deletion(
            set,
            working,
            &confirmation,
            &self.config.confirm_token,
            self.collaborators.fs,
        ) {
            BatchOutcome::Cancelled => {
                writeln!(self.prompter.output(), "Deletion cancelled.")?;
            }
            BatchOutcome::Executed(report) => {
                self.items_removed += report.removed();
                render::render_deletion_report(self.prompter.output(), &report)?;
            }
        }
        Ok(())
    }

    fn backup(&mut self) -> io::Result<Option<BackupReport>> {
        if !ensure_mounted(self.collaborators.mount, &self.config.backup, &mut self.prompter)? {
            writeln!(
                self.prompter.output(),
                "{}",
                "Aborting: the backup volume is required for backup.".red()
            )?;
            info!("Backup skipped, volume not mounted");
            return Ok(None);
        }

        render::banner(self.prompter.output(), "STARTING INCREMENTAL BACKUP")?;
        let orchestrator =
            BackupOrchestrator::new(&self.config.backup, self.collaborators.transfer);
        let report = orchestrator.run(&self.roots);
        render::render_backup_report(self.prompter.output(), &report)?;
        Ok(Some(report))
    }

    fn final_summary(&mut self, working: &WorkingSet, report: &BackupReport) -> io::Result<()> {
        let out = self.prompter.output();
        render::banner(out, "SUMMARY")?;
        writeln!(out, "Roots synced: {}/{}", report.synced(), report.outcomes.len())?;
        writeln!(out, "Items deleted this session: {}", self.items_removed)?;
        writeln!(out, "Large files still on disk:")?;
        render::render_root_summary(out, &summarize_by_root(&working.files, &self.roots))?;
        writeln!(
            out,
            "Large directories still listed: {}",
            working.directories.len()
        )
    }
}
