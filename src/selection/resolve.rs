//! Application of recognized tokens to the current working lists.

use tracing::debug;

use super::token::{parse_command, Command, SelectionToken};
use super::{DeletionEntry, DeletionSet, EntryKind};
use crate::working_set::WorkingSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Done,
    Items(DeletionSet),
    /// Every token was dropped or matched nothing.
    NoMatches,
}

/// Parse `input` and resolve it against `working` in one step.
pub fn select(input: &str, working: &WorkingSet, done_token: &str) -> Selection {
    match parse_command(input, done_token) {
        Command::Done => Selection::Done,
        Command::Select(tokens) => {
            let set = resolve(&tokens, working);
            if set.is_empty() {
                Selection::NoMatches
            } else {
                Selection::Items(set)
            }
        }
    }
}

/// Expand tokens into concrete entries. Indices outside the current lists drop
/// the whole token; duplicates collapse to one entry.
pub fn resolve(tokens: &[SelectionToken], working: &WorkingSet) -> DeletionSet {
    let mut set = DeletionSet::new();

    for token in tokens {
        let matched = match token {
            SelectionToken::FileIndex(n) => add_range(&mut set, working, EntryKind::File, *n, *n),
            SelectionToken::DirIndex(n) => {
                add_range(&mut set, working, EntryKind::Directory, *n, *n)
            }
            SelectionToken::FileRange(a, b) => {
                add_range(&mut set, working, EntryKind::File, *a, *b)
            }
            SelectionToken::DirRange(a, b) => {
                add_range(&mut set, working, EntryKind::Directory, *a, *b)
            }
            SelectionToken::ExtensionFilter(ext) => add_extension(&mut set, working, ext),
        };
        if !matched {
            debug!("Dropped selection token {:?}", token);
        }
    }

    set
}

fn list_len(working: &WorkingSet, kind: EntryKind) -> usize {
    match kind {
        EntryKind::File => working.files.len(),
        EntryKind::Directory => working.directories.len(),
    }
}

fn entry_at(working: &WorkingSet, kind: EntryKind, index: usize) -> DeletionEntry {
    let (path, size_bytes) = match kind {
        EntryKind::File => {
            let file = &working.files[index];
            (file.path.clone(), file.size_bytes)
        }
        EntryKind::Directory => {
            let dir = &working.directories[index];
            (dir.path.clone(), dir.cumulative_size_bytes)
        }
    };
    DeletionEntry {
        path,
        kind,
        index,
        size_bytes,
    }
}

/// `start` and `end` are 1-based and inclusive.
fn add_range(
    set: &mut DeletionSet,
    working: &WorkingSet,
    kind: EntryKind,
    start: usize,
    end: usize,
) -> bool {
    if start == 0 || start > end || end > list_len(working, kind) {
        return false;
    }
    for n in start..=end {
        set.insert(entry_at(working, kind, n - 1));
    }
    true
}

fn add_extension(set: &mut DeletionSet, working: &WorkingSet, ext: &str) -> bool {
    let suffix = ext.to_lowercase();
    let mut matched = false;
    for (index, file) in working.files.iter().enumerate() {
        if file.path.to_string_lossy().to_lowercase().ends_with(&suffix) {
            set.insert(entry_at(working, EntryKind::File, index));
            matched = true;
        }
    }
    matched
}
