use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Marker git emits after a line block whose last line has no terminator
pub const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

/// Represents the kind of a hunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HunkKind {
    /// Lines only exist in the new version
    #[display(fmt = "add")]
    Add,

    /// Lines were replaced
    #[display(fmt = "change")]
    Change,

    /// Lines only exist in the old version
    #[display(fmt = "delete")]
    Delete,
}

/// One side of a hunk (old/removed or new/added)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// First affected line (1-based, 0 means "before the first line")
    pub start: usize,

    /// The number of lines
    pub count: usize,

    /// Literal line contents, empty until populated
    pub lines: Vec<String>,

    /// Whether the last line of this side lacks a trailing newline
    pub no_newline_at_eof: bool,
}

impl Node {
    /// Create a node with no line contents
    pub fn new(start: usize, count: usize) -> Self {
        Self {
            start,
            count,
            lines: Vec::new(),
            no_newline_at_eof: false,
        }
    }
}

/// A contiguous block of changed lines relating an old range to a new range
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hunk {
    /// Add, change or delete
    pub kind: HunkKind,

    /// Unified-diff header, verbatim when parsed
    pub header: String,

    /// The old side
    pub removed: Node,

    /// The new side
    pub added: Node,

    /// Last new-file line touched by this hunk
    pub vend: usize,
}

impl Hunk {
    /// Create a hunk from old/new start and count, synthesizing the header
    pub fn new(old_start: usize, old_count: usize, new_start: usize, new_count: usize) -> Self {
        let kind = if new_count == 0 {
            HunkKind::Delete
        } else if old_count == 0 {
            HunkKind::Add
        } else {
            HunkKind::Change
        };

        Self {
            kind,
            header: format_header(old_start, old_count, new_start, new_count),
            removed: Node::new(old_start, old_count),
            added: Node::new(new_start, new_count),
            vend: new_start + new_count.saturating_sub(1),
        }
    }

    /// Last new-file line that carries a change (as opposed to a pure addition)
    ///
    /// For a delete this is the anchor line, for an add the last added line,
    /// and for a change the last line paired with a removed line.
    pub fn change_end(&self) -> usize {
        match self.kind {
            HunkKind::Delete => self.added.start,
            HunkKind::Add => self.added.start + self.added.count - 1,
            HunkKind::Change => {
                self.added.start + self.added.count.min(self.removed.count) - 1
            }
        }
    }

    /// Net number of lines this hunk adds to the file
    pub fn delta(&self) -> i64 {
        self.added.count as i64 - self.removed.count as i64
    }

    /// Attach line contents to both sides
    pub fn with_lines(mut self, removed: Vec<String>, added: Vec<String>) -> Self {
        self.removed.lines = removed;
        self.added.lines = added;
        self
    }
}

/// Build a hunk from the four integers a line-diff engine reports
pub fn create_hunk(old_start: usize, old_count: usize, new_start: usize, new_count: usize) -> Hunk {
    Hunk::new(old_start, old_count, new_start, new_count)
}

/// Format `@@ -A[,B] +C[,D] @@`, omitting a count when it is zero
pub fn format_header(old_start: usize, old_count: usize, new_start: usize, new_count: usize) -> String {
    let old_suffix = if old_count > 0 {
        format!(",{}", old_count)
    } else {
        String::new()
    };
    let new_suffix = if new_count > 0 {
        format!(",{}", new_count)
    } else {
        String::new()
    };
    format!("@@ -{}{} +{}{} @@", old_start, old_suffix, new_start, new_suffix)
}

/// Parse a unified-diff hunk header such as `@@ -1,3 +1,5 @@ fn main() {`
///
/// Omitted counts default to 1. The returned hunk keeps `line` as its header,
/// including any trailing context after the second `@@`.
pub fn parse_diff_line(line: &str) -> Result<Hunk, ParseError> {
    let body = line
        .strip_prefix("@@")
        .and_then(|rest| rest.split_once("@@"))
        .map(|(ranges, _)| ranges.trim())
        .ok_or_else(|| ParseError::MissingMarker(line.to_string()))?;

    let mut fields = body.split_whitespace();
    let (old_start, old_count) = parse_range(fields.next(), '-')?;
    let (new_start, new_count) = parse_range(fields.next(), '+')?;

    let mut hunk = create_hunk(old_start, old_count, new_start, new_count);
    hunk.header = line.to_string();
    Ok(hunk)
}

fn parse_range(field: Option<&str>, sign: char) -> Result<(usize, usize), ParseError> {
    let field = field.ok_or_else(|| ParseError::MalformedRange(String::new()))?;
    let range = field
        .strip_prefix(sign)
        .ok_or_else(|| ParseError::MalformedRange(field.to_string()))?;

    let parse = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| ParseError::InvalidNumber(field.to_string()))
    };

    match range.split_once(',') {
        Some((start, count)) => Ok((parse(start)?, parse(count)?)),
        None => Ok((parse(range)?, 1)),
    }
}

/// Which side received the most recent content line
#[derive(Clone, Copy)]
enum Side {
    Removed,
    Added,
}

/// Parse the hunks of a zero-context unified diff, populating line contents
///
/// The `diff --git`/`index`/`---`/`+++` preamble is skipped, as are context
/// lines. Each hunk takes only as many `-`/`+` lines as its header counts, so
/// the preamble of a following file is never mistaken for content. Lines are
/// split on `\n` alone; a `\r` before it belongs to the line content. A
/// malformed hunk header aborts the whole parse.
pub fn parse_unified_diff(text: &str) -> Result<Vec<Hunk>, ParseError> {
    let mut hunks: Vec<Hunk> = Vec::new();
    let mut last_side = None;
    // Content lines still owed to the current hunk, per side
    let (mut removed_left, mut added_left) = (0, 0);

    for line in text.split('\n') {
        if line.starts_with("@@") {
            let hunk = parse_diff_line(line)?;
            removed_left = hunk.removed.count;
            added_left = hunk.added.count;
            hunks.push(hunk);
            last_side = None;
            continue;
        }

        let Some(hunk) = hunks.last_mut() else {
            continue;
        };

        match line.as_bytes().first() {
            Some(b'-') if removed_left > 0 => {
                hunk.removed.lines.push(line[1..].to_string());
                removed_left -= 1;
                last_side = Some(Side::Removed);
            }
            Some(b'+') if added_left > 0 => {
                hunk.added.lines.push(line[1..].to_string());
                added_left -= 1;
                last_side = Some(Side::Added);
            }
            _ if line == NO_NEWLINE_MARKER => {
                match last_side.take() {
                    Some(Side::Removed) => hunk.removed.no_newline_at_eof = true,
                    Some(Side::Added) => hunk.added.no_newline_at_eof = true,
                    None => {}
                }
            }
            _ => {}
        }
    }

    Ok(hunks)
}
