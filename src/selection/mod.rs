pub mod resolve;
pub mod token;

use std::fmt;
use std::path::PathBuf;

pub use resolve::{resolve, select, Selection};
pub use token::{parse_command, tokenize, Command, SelectionToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Prefix used in listings and commands.
    pub fn prefix(self) -> char {
        match self {
            EntryKind::File => 'F',
            EntryKind::Directory => 'D',
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => write!(f, "file"),
            EntryKind::Directory => write!(f, "directory"),
        }
    }
}

/// One item slated for removal. `index` is the 0-based position in the
/// working list the selection was resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    pub index: usize,
    pub size_bytes: u64,
}

impl DeletionEntry {
    /// `F3`, `D1`, ... as shown to the operator.
    pub fn label(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.index + 1)
    }
}

/// Items selected for removal, unique by kind and index, in the order they
/// were first referenced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionSet {
    entries: Vec<DeletionEntry>,
}

impl DeletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when an entry of the same kind and index is already present.
    pub fn insert(&mut self, entry: DeletionEntry) -> bool {
        if self
            .entries
            .iter()
            .any(|e| e.kind == entry.kind && e.index == entry.index)
        {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn entries(&self) -> &[DeletionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.size_bytes).sum()
    }

    /// Entries of one kind, highest index first.
    pub fn descending(&self, kind: EntryKind) -> Vec<&DeletionEntry> {
        let mut of_kind: Vec<&DeletionEntry> =
            self.entries.iter().filter(|e| e.kind == kind).collect();
        of_kind.sort_by(|a, b| b.index.cmp(&a.index));
        of_kind
    }

    pub fn indices(&self, kind: EntryKind) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.index)
            .collect();
        indices.sort_unstable();
        indices
    }
}
