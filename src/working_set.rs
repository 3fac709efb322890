use std::path::Path;

use crate::analysis::ranking::is_same_or_descendant;
use crate::scanner::{ScannedDirectory, ScannedFile};

/// The shrinking lists shown to the operator between prompts. Only the
/// deletion executor mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingSet {
    pub files: Vec<ScannedFile>,
    pub directories: Vec<ScannedDirectory>,
}

impl WorkingSet {
    pub fn new(files: Vec<ScannedFile>, directories: Vec<ScannedDirectory>) -> Self {
        Self { files, directories }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    pub fn file_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size_bytes).sum()
    }

    /// Remove the file at `index` if it still holds `path`, otherwise the
    /// first file with that path.
    pub(crate) fn remove_file(&mut self, index: usize, path: &Path) -> Option<ScannedFile> {
        let position = match self.files.get(index) {
            Some(file) if file.path == path => Some(index),
            _ => self.files.iter().position(|f| f.path == path),
        }?;
        Some(self.files.remove(position))
    }

    pub(crate) fn remove_directory(
        &mut self,
        index: usize,
        path: &Path,
    ) -> Option<ScannedDirectory> {
        let position = match self.directories.get(index) {
            Some(dir) if dir.path == path => Some(index),
            _ => self.directories.iter().position(|d| d.path == path),
        }?;
        Some(self.directories.remove(position))
    }

    /// Drop every listed entry at or beneath a removed directory.
    pub(crate) fn prune_beneath(&mut self, removed: &Path) {
        self.files
            .retain(|f| !is_same_or_descendant(&f.path, removed));
        self.directories
            .retain(|d| !is_same_or_descendant(&d.path, removed));
    }

    /// A removed file no longer counts toward the listed directories holding it.
    pub(crate) fn discount_file(&mut self, removed: &ScannedFile) {
        for dir in &mut self.directories {
            if removed.path.starts_with(&dir.path) {
                dir.cumulative_size_bytes =
                    dir.cumulative_size_bytes.saturating_sub(removed.size_bytes);
            }
        }
    }

    /// Restore largest-first order after sizes changed. Stable, so equal sizes
    /// keep their current relative order.
    pub(crate) fn sort_directories(&mut self) {
        self.directories
            .sort_by(|a, b| b.cumulative_size_bytes.cmp(&a.cumulative_size_bytes));
    }
}
