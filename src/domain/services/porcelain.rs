//! Short-status (porcelain v1) parsing
//!
//! Each line is `XY <path>` where `X` is the index column and `Y` the
//! working-tree column. Renames and copies are `XY <from> -> <to>`. Paths
//! with special characters are C-quoted.

use crate::domain::ports::{StatusEntry, WorkingChange};
use crate::domain::value_objects::RepoPath;

/// Parse the full output of `git status --porcelain`
pub fn parse_status(output: &str) -> Vec<StatusEntry> {
    output.lines().filter_map(parse_line).collect()
}

/// Parse one status line; `None` for blank or malformed lines
pub fn parse_line(line: &str) -> Option<StatusEntry> {
    let line = line.trim_end_matches('\r');
    let bytes = line.as_bytes();
    if bytes.len() < 4 || !bytes[0].is_ascii() || !bytes[1].is_ascii() || bytes[2] != b' ' {
        return None;
    }

    let x = bytes[0] as char;
    let y = bytes[1] as char;
    let raw_path = &line[3..];

    let change = classify(x, y);
    let path = match change {
        // only the destination of a rename is meaningful, and renames are never in scope
        WorkingChange::Other => raw_path
            .rsplit_once(" -> ")
            .map(|(_, to)| to)
            .unwrap_or(raw_path),
        _ => raw_path,
    };

    let path = RepoPath::new(unquote(path));
    if path.is_empty() {
        return None;
    }
    Some(StatusEntry { change, path })
}

fn classify(x: char, y: char) -> WorkingChange {
    match (x, y) {
        ('?', '?') => WorkingChange::Untracked,
        (_, 'D') => WorkingChange::Other,
        ('A', _) => WorkingChange::Added,
        ('M', _) | (' ', 'M') => WorkingChange::Modified,
        _ => WorkingChange::Other,
    }
}

/// Undo git's C-style quoting (`"a\tb"`, `"caf\303\251.ts"`)
pub fn unquote(path: &str) -> String {
    let inner = match path
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner,
        None => return path.to_string(),
    };

    let mut bytes: Vec<u8> = Vec::with_capacity(inner.len());
    let mut iter = inner.bytes().peekable();
    while let Some(b) = iter.next() {
        if b != b'\\' {
            bytes.push(b);
            continue;
        }
        match iter.next() {
            Some(b'n') => bytes.push(b'\n'),
            Some(b't') => bytes.push(b'\t'),
            Some(b'r') => bytes.push(b'\r'),
            Some(b'a') => bytes.push(0x07),
            Some(b'b') => bytes.push(0x08),
            Some(b'f') => bytes.push(0x0c),
            Some(b'v') => bytes.push(0x0b),
            Some(d @ b'0'..=b'7') => {
                let mut value = u32::from(d - b'0');
                for _ in 0..2 {
                    match iter.peek() {
                        Some(&next @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(next - b'0');
                            iter.next();
                        }
                        _ => break,
                    }
                }
                bytes.push((value & 0xff) as u8);
            }
            Some(other) => bytes.push(other),
            None => bytes.push(b'\\'),
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}
