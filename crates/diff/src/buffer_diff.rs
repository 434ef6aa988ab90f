use anyhow::{Context, Result};
use log::debug;
use ropey::Rope;
use similar::{DiffOp, DiffTag, TextDiff};
use std::ops::Range;

use crate::config::DiffConfig;
use crate::highlight::{build_highlighted_lines, FileFormat, LineSpec};
use crate::hunk::{create_hunk, parse_unified_diff, Hunk};
use crate::locate::{find_hunk, find_nearest_hunk, Direction};
use crate::partial::create_partial_hunk;
use crate::patch::{create_patch, Patch};
use crate::signs::{LineWindow, Sign};
use crate::summary::{get_summary, Summary};
use crate::word_diff::WordDiff;

/// Represents a diff between two buffers (text documents)
#[derive(Debug, Clone)]
pub struct BufferDiff {
    /// The old version of the text
    old_text: Rope,

    /// The new version of the text
    new_text: Rope,

    /// The hunks in this diff, ascending by new start
    hunks: Vec<Hunk>,

    /// How the hunks were computed and are presented
    config: DiffConfig,
}

/// An immutable snapshot of a buffer diff
#[derive(Debug, Clone)]
pub struct BufferDiffSnapshot {
    /// The hunks in this diff
    pub hunks: Vec<Hunk>,

    /// The number of lines in the old text
    pub old_line_count: usize,

    /// The number of lines in the new text
    pub new_line_count: usize,
}

/// Number of newline-terminated (or final unterminated) lines in a rope
fn line_count(rope: &Rope) -> usize {
    let chars = rope.len_chars();
    if chars == 0 {
        return 0;
    }
    let lines = rope.len_lines();
    if rope.char(chars - 1) == '\n' {
        lines - 1
    } else {
        lines
    }
}

/// Line contents of `range` without their `\n` terminators
fn collect_lines(slices: &[&str], range: Range<usize>) -> Vec<String> {
    slices[range]
        .iter()
        .map(|&line| line.strip_suffix('\n').unwrap_or(line).to_string())
        .collect()
}

/// Start line in git's zero-context convention
///
/// An empty side starts at the line before the edit, so an insertion at the
/// top of a file starts at 0.
fn hunk_start(range: &Range<usize>) -> usize {
    if range.is_empty() {
        range.start
    } else {
        range.start + 1
    }
}

/// Whether a side's block ends on the text's unterminated last line
fn ends_without_newline(text: &str, slices: &[&str], range: &Range<usize>) -> bool {
    !range.is_empty() && range.end == slices.len() && !text.ends_with('\n')
}

/// Group runs of non-equal ops; each run becomes one hunk
fn change_groups(ops: &[DiffOp]) -> Vec<(Range<usize>, Range<usize>)> {
    let mut groups = Vec::new();
    let mut current: Option<(Range<usize>, Range<usize>)> = None;

    for op in ops {
        if op.tag() == DiffTag::Equal {
            groups.extend(current.take());
            continue;
        }
        let (old, new) = (op.old_range(), op.new_range());
        current = Some(match current.take() {
            Some((o, n)) => (o.start..old.end, n.start..new.end),
            None => (old, new),
        });
    }

    groups.extend(current);
    groups
}

impl BufferDiff {
    /// Create a new buffer diff between two texts with the default configuration
    pub fn new(old_text: &str, new_text: &str) -> Result<Self> {
        Self::with_config(old_text, new_text, DiffConfig::default())
    }

    pub(crate) fn with_config(old_text: &str, new_text: &str, config: DiffConfig) -> Result<Self> {
        let mut diff = Self {
            old_text: Rope::from_str(old_text),
            new_text: Rope::from_str(new_text),
            hunks: Vec::new(),
            config,
        };

        diff.compute_hunks(old_text, new_text)
            .context("Failed to compute hunks")?;

        Ok(diff)
    }

    /// Build a diff from externally produced zero-context unified diff text
    pub fn from_unified(old_text: &str, new_text: &str, diff_text: &str) -> Result<Self> {
        let hunks = parse_unified_diff(diff_text).context("Failed to parse unified diff")?;
        debug!("Parsed {} hunks from unified diff", hunks.len());

        Ok(Self {
            old_text: Rope::from_str(old_text),
            new_text: Rope::from_str(new_text),
            hunks,
            config: DiffConfig::default(),
        })
    }

    /// Compute the hunks between the old and new text
    fn compute_hunks(&mut self, old_text: &str, new_text: &str) -> Result<()> {
        let mut diff_config = TextDiff::configure();
        diff_config.algorithm(self.config.algorithm);
        if let Some(timeout) = self.config.timeout {
            diff_config.timeout(timeout);
        }
        let diff = diff_config.diff_lines(old_text, new_text);

        let old_lines = diff.old_slices();
        let new_lines = diff.new_slices();

        for (old, new) in change_groups(diff.ops()) {
            anyhow::ensure!(
                old.end <= old_lines.len() && new.end <= new_lines.len(),
                "diff op out of range: old {:?} new {:?}",
                old,
                new
            );

            let mut hunk = create_hunk(hunk_start(&old), old.len(), hunk_start(&new), new.len())
                .with_lines(
                    collect_lines(old_lines, old.clone()),
                    collect_lines(new_lines, new.clone()),
                );
            hunk.removed.no_newline_at_eof = ends_without_newline(old_text, old_lines, &old);
            hunk.added.no_newline_at_eof = ends_without_newline(new_text, new_lines, &new);

            self.hunks.push(hunk);
        }

        debug!("Computed {} hunks", self.hunks.len());
        Ok(())
    }

    /// Get a snapshot of the current diff
    pub fn snapshot(&self) -> BufferDiffSnapshot {
        BufferDiffSnapshot {
            hunks: self.hunks.clone(),
            old_line_count: line_count(&self.old_text),
            new_line_count: line_count(&self.new_text),
        }
    }

    /// Get the old text
    pub fn old_text(&self) -> &Rope {
        &self.old_text
    }

    /// Get the new text
    pub fn new_text(&self) -> &Rope {
        &self.new_text
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Get the hunks
    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }

    /// Get the number of hunks
    pub fn hunk_count(&self) -> usize {
        self.hunks.len()
    }

    /// Get a hunk by index
    pub fn hunk(&self, index: usize) -> Option<&Hunk> {
        self.hunks.get(index)
    }

    /// Gutter signs for the visible window, using the configured strategy
    pub fn signs(&self, window: LineWindow) -> Vec<Sign> {
        self.config
            .sign_calculator()
            .signs_for_hunks(&self.hunks, window, false)
    }

    pub fn summary(&self) -> Summary {
        get_summary(&self.hunks)
    }

    /// The hunk covering only the edits within new lines `top..=bot`
    pub fn partial_hunk(&self, top: usize, bot: usize) -> Option<Hunk> {
        create_partial_hunk(&self.hunks, top, bot)
    }

    pub fn find_hunk(&self, line_number: usize) -> Option<(&Hunk, usize)> {
        find_hunk(line_number, &self.hunks)
    }

    pub fn nearest_hunk(&self, line_number: usize, direction: Direction, wrap: bool) -> Option<usize> {
        find_nearest_hunk(line_number, &self.hunks, direction, wrap)
    }

    /// Serialize the hunks as a patch against `relpath`
    pub fn patch(&self, relpath: &str, mode_bits: &str, invert: bool) -> Patch {
        create_patch(relpath, &self.hunks, mode_bits, invert)
    }

    /// Preview records for one hunk
    pub fn highlighted_lines(&self, index: usize, file_format: FileFormat) -> Option<Vec<LineSpec>> {
        let hunk = self.hunks.get(index)?;
        let word_differ = self.config.word_differ();
        Some(build_highlighted_lines(
            hunk,
            file_format,
            word_differ.as_ref().map(|w| w as &dyn WordDiff),
        ))
    }
}

impl BufferDiffSnapshot {
    /// Create a new empty diff snapshot
    pub fn empty() -> Self {
        Self {
            hunks: Vec::new(),
            old_line_count: 0,
            new_line_count: 0,
        }
    }

    /// Get the hunks
    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }

    /// Get the number of hunks
    pub fn hunk_count(&self) -> usize {
        self.hunks.len()
    }

    /// Get a hunk by index
    pub fn hunk(&self, index: usize) -> Option<&Hunk> {
        self.hunks.get(index)
    }

    /// Check if the diff has any changes
    pub fn has_changes(&self) -> bool {
        !self.hunks.is_empty()
    }

    pub fn summary(&self) -> Summary {
        get_summary(&self.hunks)
    }
}
