use std::path::{Path, PathBuf};

use crate::scanner::ScannedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSummary {
    pub root: PathBuf,
    pub file_count: usize,
    pub total_bytes: u64,
}

/// Group listed files under the scan root that holds them. Roots keep their
/// given order; roots with no listed files are still reported.
pub fn summarize_by_root(files: &[ScannedFile], roots: &[PathBuf]) -> Vec<RootSummary> {
    let mut summaries: Vec<RootSummary> = roots
        .iter()
        .map(|root| RootSummary {
            root: root.clone(),
            file_count: 0,
            total_bytes: 0,
        })
        .collect();

    for file in files {
        if let Some(summary) = owning_root(&mut summaries, &file.path) {
            summary.file_count += 1;
            summary.total_bytes += file.size_bytes;
        }
    }

    summaries
}

fn owning_root<'a>(summaries: &'a mut [RootSummary], path: &Path) -> Option<&'a mut RootSummary> {
    summaries
        .iter_mut()
        .filter(|s| path.starts_with(&s.root))
        .max_by_key(|s| s.root.components().count())
}
