use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::platform::FileSystem;
use crate::scanner::ScannedFile;
use crate::selection::{DeletionEntry, DeletionSet, EntryKind};
use crate::working_set::WorkingSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionStatus {
    Removed,
    /// Already gone when the batch ran.
    Missing,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct DeletionOutcome {
    pub entry: DeletionEntry,
    pub status: DeletionStatus,
}

#[derive(Debug, Clone, Default)]
pub struct DeletionReport {
    pub outcomes: Vec<DeletionOutcome>,
}

impl DeletionReport {
    fn count(&self, wanted: fn(&DeletionStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| wanted(&o.status)).count()
    }

    pub fn removed(&self) -> usize {
        self.count(|s| *s == DeletionStatus::Removed)
    }

    pub fn missing(&self) -> usize {
        self.count(|s| *s == DeletionStatus::Missing)
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, DeletionStatus::Failed(_)))
    }

    /// Bytes released by the batch. A removed file that sits inside a removed
    /// directory of the same batch is already part of that directory's size.
    pub fn freed_bytes(&self) -> u64 {
        let removed_dirs: Vec<&PathBuf> = self
            .outcomes
            .iter()
            .filter(|o| {
                o.entry.kind == EntryKind::Directory && o.status == DeletionStatus::Removed
            })
            .map(|o| &o.entry.path)
            .collect();

        self.outcomes
            .iter()
            .filter(|o| o.status == DeletionStatus::Removed)
            .filter(|o| {
                o.entry.kind == EntryKind::Directory
                    || !removed_dirs.iter().any(|dir| o.entry.path.starts_with(dir))
            })
            .map(|o| o.entry.size_bytes)
            .sum()
    }
}

#[derive(Debug, Clone)]
pub enum BatchOutcome {
    /// Confirmation did not match; nothing was touched.
    Cancelled,
    Executed(DeletionReport),
}

/// Remove every entry in `set` from disk and from `working`.
///
/// Nothing happens unless `confirmation` equals `expected` exactly. Files are
/// processed first, then directories, each from the highest index down, so a
/// removal never shifts an entry that is still pending. Missing paths are
/// skipped and dropped from the lists; failed removals are reported and the
/// batch carries on.
pub fn execute_deletion(
    set: &DeletionSet,
    working: &mut WorkingSet,
    confirmation: &str,
    expected: &str,
    fs: &dyn FileSystem,
) -> BatchOutcome {
    if confirmation != expected {
        info!("Deletion cancelled");
        return BatchOutcome::Cancelled;
    }

    let mut report = DeletionReport::default();
    let mut removed_files: Vec<ScannedFile> = Vec::new();
    let mut removed_dirs: Vec<PathBuf> = Vec::new();

    for entry in set.descending(EntryKind::File) {
        let status = remove_entry(entry, fs);
        if !matches!(status, DeletionStatus::Failed(_)) {
            if let Some(file) = working.remove_file(entry.index, &entry.path) {
                if status == DeletionStatus::Removed {
                    removed_files.push(file);
                }
            }
        }
        report.outcomes.push(DeletionOutcome {
            entry: entry.clone(),
            status,
        });
    }

    for entry in set.descending(EntryKind::Directory) {
        let status = remove_entry(entry, fs);
        if !matches!(status, DeletionStatus::Failed(_)) {
            working.remove_directory(entry.index, &entry.path);
            removed_dirs.push(entry.path.clone());
        }
        report.outcomes.push(DeletionOutcome {
            entry: entry.clone(),
            status,
        });
    }

    for file in &removed_files {
        working.discount_file(file);
    }
    for dir in &removed_dirs {
        working.prune_beneath(dir);
    }
    working.sort_directories();

    info!(
        "Deletion batch executed: {} removed, {} already gone, {} failed",
        report.removed(),
        report.missing(),
        report.failed()
    );
    BatchOutcome::Executed(report)
}

fn remove_entry(entry: &DeletionEntry, fs: &dyn FileSystem) -> DeletionStatus {
    let path = entry.path.as_path();
    if !fs.exists(path) {
        warn!("'{}' no longer exists, skipping", path.display());
        return DeletionStatus::Missing;
    }

    let result = if fs.is_dir(path) {
        fs.remove_dir_all(path)
    } else {
        fs.remove_file(path)
    };

    match result {
        Ok(()) => {
            debug!("Removed {} {}", entry.kind, path.display());
            DeletionStatus::Removed
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => DeletionStatus::Missing,
        Err(e) => {
            error!("Failed to remove '{}': {}", path.display(), e);
            DeletionStatus::Failed(e.to_string())
        }
    }
}
