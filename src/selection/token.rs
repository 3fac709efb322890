//! Recognition of operator commands. Tokens that cannot be recognized are
//! dropped here; bounds are checked later against the current lists.

use super::EntryKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionToken {
    FileIndex(usize),
    DirIndex(usize),
    FileRange(usize, usize),
    DirRange(usize, usize),
    /// Lowercased suffix including the leading dot, e.g. `.iso`.
    ExtensionFilter(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Done,
    Select(Vec<SelectionToken>),
}

/// Parse a whole command line. Matching is case-insensitive; tokens are split
/// on commas and whitespace, and whitespace around a range dash is ignored.
pub fn parse_command(input: &str, done_token: &str) -> Command {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case(done_token.trim()) {
        return Command::Done;
    }
    Command::Select(tokenize(trimmed))
}

pub fn tokenize(input: &str) -> Vec<SelectionToken> {
    raw_tokens(&input.to_lowercase())
        .iter()
        .filter_map(|raw| parse_token(raw))
        .collect()
}

fn raw_tokens(input: &str) -> Vec<String> {
    let joined = input.split('-').map(str::trim).collect::<Vec<_>>().join("-");
    joined
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_token(raw: &str) -> Option<SelectionToken> {
    if raw.starts_with('.') {
        return (raw.len() > 1).then(|| SelectionToken::ExtensionFilter(raw.to_string()));
    }

    match raw.split_once('-') {
        Some((lhs, rhs)) => {
            let (lhs_kind, start) = parse_indexed(lhs)?;
            let (rhs_kind, end) = parse_indexed(rhs)?;
            let kind = match (lhs_kind, rhs_kind) {
                (Some(a), Some(b)) if a == b => a,
                (Some(a), None) => a,
                (None, None) => EntryKind::File,
                _ => return None,
            };
            if start == 0 || start > end {
                return None;
            }
            Some(match kind {
                EntryKind::File => SelectionToken::FileRange(start, end),
                EntryKind::Directory => SelectionToken::DirRange(start, end),
            })
        }
        None => {
            let (kind, n) = parse_indexed(raw)?;
            if n == 0 {
                return None;
            }
            Some(match kind.unwrap_or(EntryKind::File) {
                EntryKind::File => SelectionToken::FileIndex(n),
                EntryKind::Directory => SelectionToken::DirIndex(n),
            })
        }
    }
}

/// `f12`, `d3` or a bare `7`. A bare number carries no kind.
fn parse_indexed(raw: &str) -> Option<(Option<EntryKind>, usize)> {
    let (kind, digits) = match raw.chars().next()? {
        'f' => (Some(EntryKind::File), &raw[1..]),
        'd' => (Some(EntryKind::Directory), &raw[1..]),
        c if c.is_ascii_digit() => (None, raw),
        _ => return None,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|n| (kind, n))
}
