use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::analysis::ranking;
use crate::config::AppConfig;
use crate::progress::ProgressReporter;
use crate::scanner::walk::{build_size_index, ScanOptions};
use crate::scanner::{ScannedDirectory, ScannedFile, SizeIndex};
use crate::working_set::WorkingSet;

pub struct ScanEngine {
    config: AppConfig,
}

#[derive(Debug)]
pub struct ScanResult {
    pub index: SizeIndex,
    /// Largest files, capped at `file_limit`.
    pub files: Vec<ScannedFile>,
    /// Largest non-nested directories, capped at `dir_limit`.
    pub directories: Vec<ScannedDirectory>,
    pub scan_duration: Duration,
}

impl ScanResult {
    pub fn working_set(&self) -> WorkingSet {
        WorkingSet::new(self.files.clone(), self.directories.clone())
    }
}

impl ScanEngine {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn roots(&self) -> Vec<PathBuf> {
        self.config.resolved_roots()
    }

    /// Scan every configured root once, then rank files and directories.
    pub fn scan(&self, reporter: &dyn ProgressReporter) -> ScanResult {
        let roots = self.roots();
        info!("Processing directories: {:?}", roots);

        let options = ScanOptions {
            file_threshold_bytes: self.config.file_threshold_bytes,
            ignore_patterns: self.config.ignore_patterns.clone(),
        };

        let scan_start = Instant::now();
        let index = build_size_index(&roots, &options, reporter);
        let scan_duration = scan_start.elapsed();

        let files = ranking::rank_files(&index.files, self.config.file_limit);
        let directories = ranking::rank_directories(&index, self.config.dir_limit);
        debug!(
            "Scan completed in {:.2}s: {} files seen, {} oversized, {} directories, {} bytes total",
            scan_duration.as_secs_f64(),
            index.files_seen,
            index.files.len(),
            index.directories.len(),
            index.total_bytes(),
        );

        ScanResult {
            index,
            files,
            directories,
            scan_duration,
        }
    }
}
