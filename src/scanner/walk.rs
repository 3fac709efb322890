use glob::Pattern;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use super::{ScannedFile, SizeIndex};
use crate::progress::ProgressReporter;

const PROGRESS_EVERY: usize = 500;

/// Options controlling one scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Files strictly larger than this are recorded in `SizeIndex::files`.
    pub file_threshold_bytes: u64,
    pub ignore_patterns: Vec<String>,
}

/// A directory whose subtree is still being walked.
struct OpenDir {
    depth: usize,
    slot: usize,
    total: u64,
}

/// Depth-first walk of every root. Directory totals are folded bottom-up: a
/// directory is finalized when the walk leaves its subtree, and its total is
/// then added to the directory one level up. Roots that do not exist are
/// skipped; unreadable entries count as zero bytes.
pub fn build_size_index(
    roots: &[PathBuf],
    options: &ScanOptions,
    reporter: &dyn ProgressReporter,
) -> SizeIndex {
    let ignore_patterns: Vec<Pattern> = options
        .ignore_patterns
        .iter()
        .filter_map(|glob| match Pattern::new(glob) {
            Ok(p) => Some(p),
            Err(e) => {
                error!("Invalid glob pattern '{}': {}", glob, e);
                None
            }
        })
        .collect();

    let mut index = SizeIndex::default();
    let start = Instant::now();
    reporter.on_scan_start();

    for root in roots {
        if !root.is_dir() {
            debug!("Skipping missing root {}", root.display());
            continue;
        }
        info!("Scanning: {}", root.display());
        reporter.on_root_start(&root.to_string_lossy());
        index.roots.push(root.clone());
        scan_root(root, &ignore_patterns, options.file_threshold_bytes, &mut index, reporter);
    }

    reporter.on_scan_complete(index.files_seen, start.elapsed().as_secs_f64());
    index
}

fn scan_root(
    root: &Path,
    ignore_patterns: &[Pattern],
    threshold: u64,
    index: &mut SizeIndex,
    reporter: &dyn ProgressReporter,
) {
    let mut open: Vec<OpenDir> = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_ignored(entry.path(), ignore_patterns));

    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                continue;
            }
        };

        close_subtrees(&mut open, entry.depth(), index);

        if entry.file_type().is_dir() {
            let slot = index.open_directory(entry.path().to_path_buf());
            open.push(OpenDir {
                depth: entry.depth(),
                slot,
                total: 0,
            });
            continue;
        }

        // Symlinks are not followed and contribute nothing.
        let size = if entry.file_type().is_file() {
            match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    debug!("Size unavailable for {}: {}", entry.path().display(), err);
                    0
                }
            }
        } else {
            0
        };

        if let Some(parent) = open.last_mut() {
            parent.total += size;
        }

        index.files_seen += 1;
        if index.files_seen % PROGRESS_EVERY == 0 {
            reporter.on_scan_progress(index.files_seen, &entry.path().to_string_lossy());
        }

        if size > threshold {
            index.files.push(ScannedFile {
                path: entry.into_path(),
                size_bytes: size,
            });
        }
    }

    close_subtrees(&mut open, 0, index);
}

/// Finalize every open directory at `depth` or deeper, pushing each total into
/// the directory above it.
fn close_subtrees(open: &mut Vec<OpenDir>, depth: usize, index: &mut SizeIndex) {
    while open.last().is_some_and(|top| top.depth >= depth) {
        if let Some(done) = open.pop() {
            index.directories[done.slot].cumulative_size_bytes = done.total;
            if let Some(parent) = open.last_mut() {
                parent.total += done.total;
            }
        }
    }
}

fn is_ignored(path: &Path, ignore_patterns: &[Pattern]) -> bool {
    ignore_patterns
        .iter()
        .any(|pattern| pattern.matches_path(path))
}
