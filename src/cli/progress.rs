use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::time::Duration;

use size_trim::ProgressReporter;

/// Spinner on stderr while the roots are walked.
#[derive(Default)]
pub struct CliReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for CliReporter {
    fn on_scan_start(&self) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message("Scanning files...");
        pb.enable_steady_tick(Duration::from_millis(80));
        if let Some(old) = self.bar.replace(Some(pb)) {
            old.finish_and_clear();
        }
    }

    fn on_root_start(&self, root: &str) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.set_message(format!("Scanning {}...", root));
        }
    }

    fn on_scan_progress(&self, files_seen: usize, _current_path: &str) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.set_message(format!("Scanning... {} files seen", files_seen));
        }
    }

    fn on_scan_complete(&self, total_files: usize, duration_secs: f64) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
        eprintln!(
            "  {} Scan complete: {} files in {:.2}s",
            "✓".green(),
            total_files,
            duration_secs
        );
    }
}
