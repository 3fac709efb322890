/// Trait for reporting scan progress.
///
/// The CLI implements this with an indicatif spinner. All methods have default
/// no-op implementations.
pub trait ProgressReporter {
    fn on_scan_start(&self) {}
    fn on_root_start(&self, _root: &str) {}
    fn on_scan_progress(&self, _files_seen: usize, _current_path: &str) {}
    fn on_scan_complete(&self, _total_files: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
