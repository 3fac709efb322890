use std::path::Path;

use crate::scanner::{ScannedDirectory, ScannedFile, SizeIndex};

/// True when `path` is `ancestor` or lies beneath it. Compared per component,
/// so `/a/b` is not an ancestor of `/a/bc`.
pub fn is_same_or_descendant(path: &Path, ancestor: &Path) -> bool {
    path.starts_with(ancestor)
}

/// The largest directories strictly under a scan root, largest first, with
/// nested entries suppressed: once a directory is accepted none of its
/// descendants is reported. Ties keep discovery order.
pub fn rank_directories(index: &SizeIndex, limit: usize) -> Vec<ScannedDirectory> {
    let mut candidates: Vec<&ScannedDirectory> = index
        .directories
        .iter()
        .filter(|dir| !index.is_root(&dir.path))
        .collect();
    // sort_by is stable, so equal sizes stay in pre-order (ancestors first).
    candidates.sort_by(|a, b| b.cumulative_size_bytes.cmp(&a.cumulative_size_bytes));

    let mut ranked: Vec<ScannedDirectory> = Vec::new();
    for candidate in candidates {
        if ranked.len() >= limit {
            break;
        }
        if ranked
            .iter()
            .any(|accepted| is_same_or_descendant(&candidate.path, &accepted.path))
        {
            continue;
        }
        ranked.push(candidate.clone());
    }
    ranked
}

/// The `limit` largest files, largest first, ties in discovery order.
pub fn rank_files(files: &[ScannedFile], limit: usize) -> Vec<ScannedFile> {
    let mut ranked = files.to_vec();
    ranked.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
    ranked.truncate(limit);
    ranked
}
