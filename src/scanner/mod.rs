pub mod walk;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use walk::build_size_index;

/// A file large enough to be listed individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// A directory with the total size of everything beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedDirectory {
    pub path: PathBuf,
    pub cumulative_size_bytes: u64,
}

/// Result of one scan over a set of roots.
///
/// `files` holds only oversized files, in discovery order. `directories` holds
/// every directory visited (roots included), in pre-order discovery order, so an
/// ancestor always precedes its descendants.
#[derive(Debug, Default)]
pub struct SizeIndex {
    pub roots: Vec<PathBuf>,
    pub files: Vec<ScannedFile>,
    pub directories: Vec<ScannedDirectory>,
    pub files_seen: usize,
    positions: HashMap<PathBuf, usize>,
}

impl SizeIndex {
    pub(crate) fn open_directory(&mut self, path: PathBuf) -> usize {
        let slot = self.directories.len();
        self.positions.insert(path.clone(), slot);
        self.directories.push(ScannedDirectory {
            path,
            cumulative_size_bytes: 0,
        });
        slot
    }

    pub fn cumulative_size(&self, path: &Path) -> Option<u64> {
        self.positions
            .get(path)
            .map(|&slot| self.directories[slot].cumulative_size_bytes)
    }

    /// Sum over all scanned roots.
    pub fn total_bytes(&self) -> u64 {
        self.roots
            .iter()
            .filter_map(|root| self.cumulative_size(root))
            .sum()
    }

    pub fn is_root(&self, path: &Path) -> bool {
        self.roots.iter().any(|root| root == path)
    }
}
