use derive_more::Display;
use similar::{Algorithm, DiffTag, TextDiff};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::hunk::HunkKind;

/// Token size for intraline diffs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Granularity {
    #[default]
    #[display(fmt = "character")]
    Character,
    #[display(fmt = "word")]
    Word,
}

/// A highlighted span inside one line of a hunk side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region {
    /// Index of the line within its side (0-based)
    pub line: usize,

    /// What happened to the span
    pub kind: HunkKind,

    /// Byte column where the span starts
    pub start_col: usize,

    /// Byte column one past the end of the span
    pub end_col: usize,
}

/// An intraline diff engine
pub trait WordDiff {
    /// Regions changed between paired removed and added lines
    ///
    /// Returns the removed-side regions and the added-side regions, each in
    /// ascending line order.
    fn word_diff(&self, removed: &[String], added: &[String]) -> (Vec<Region>, Vec<Region>);
}

/// Word diff backed by the `similar` crate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarWordDiff {
    algorithm: Algorithm,
    granularity: Granularity,
}

impl Default for SimilarWordDiff {
    fn default() -> Self {
        Self::new(Algorithm::Myers, Granularity::default())
    }
}

impl SimilarWordDiff {
    pub fn new(algorithm: Algorithm, granularity: Granularity) -> Self {
        Self {
            algorithm,
            granularity,
        }
    }

    fn diff_pair<'a>(&self, old: &'a str, new: &'a str) -> TextDiff<'a, 'a, 'a, str> {
        let mut config = TextDiff::configure();
        config.algorithm(self.algorithm);
        match self.granularity {
            Granularity::Character => config.diff_chars(old, new),
            Granularity::Word => config.diff_words(old, new),
        }
    }
}

/// Byte offset of every token boundary, including the end
fn token_offsets(tokens: &[&str]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(tokens.len() + 1);
    let mut pos = 0;
    offsets.push(pos);
    for token in tokens {
        pos += token.len();
        offsets.push(pos);
    }
    offsets
}

impl WordDiff for SimilarWordDiff {
    fn word_diff(&self, removed: &[String], added: &[String]) -> (Vec<Region>, Vec<Region>) {
        let mut rems = Vec::new();
        let mut adds = Vec::new();

        // Only line-for-line rewrites have a meaningful pairing
        if removed.len() != added.len() {
            return (rems, adds);
        }

        for (line, (old, new)) in removed.iter().zip(added).enumerate() {
            let diff = self.diff_pair(old, new);
            let old_offsets = token_offsets(diff.old_slices());
            let new_offsets = token_offsets(diff.new_slices());

            for op in diff.ops() {
                let kind = match op.tag() {
                    DiffTag::Equal => continue,
                    DiffTag::Delete => HunkKind::Delete,
                    DiffTag::Insert => HunkKind::Add,
                    DiffTag::Replace => HunkKind::Change,
                };

                let old_range = op.old_range();
                if !old_range.is_empty() {
                    rems.push(Region {
                        line,
                        kind,
                        start_col: old_offsets[old_range.start],
                        end_col: old_offsets[old_range.end],
                    });
                }

                let new_range = op.new_range();
                if !new_range.is_empty() {
                    adds.push(Region {
                        line,
                        kind,
                        start_col: new_offsets[new_range.start],
                        end_col: new_offsets[new_range.end],
                    });
                }
            }
        }

        (rems, adds)
    }
}
