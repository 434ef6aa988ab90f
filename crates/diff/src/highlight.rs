use derive_more::Display;
use smallvec::{smallvec, SmallVec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::hunk::Hunk;
use crate::word_diff::WordDiff;

/// Line-ending convention of the file a hunk belongs to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FileFormat {
    #[default]
    #[display(fmt = "unix")]
    Unix,
    /// CRLF line endings
    #[display(fmt = "dos")]
    Dos,
    #[display(fmt = "mac")]
    Mac,
}

/// Highlight classes understood by the preview renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HighlightGroup {
    #[display(fmt = "DeletePreview")]
    DeletePreview,
    #[display(fmt = "AddPreview")]
    AddPreview,
    #[display(fmt = "DeleteInline")]
    DeleteInline,
    #[display(fmt = "AddInline")]
    AddInline,
}

/// A highlight over part of a line record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HighlightMark {
    pub group: HighlightGroup,

    /// Byte column in the record text where the mark starts
    pub start_col: usize,

    /// Byte column one past the end, `None` for the rest of the line
    pub end_col: Option<usize>,
}

impl HighlightMark {
    fn whole_line(group: HighlightGroup) -> Self {
        Self {
            group,
            start_col: 0,
            end_col: None,
        }
    }
}

/// One preview line: prefixed text plus its highlights
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineSpec {
    pub text: String,
    pub marks: SmallVec<[HighlightMark; 2]>,
}

/// Build preview records for a hunk's removed lines followed by its added lines
///
/// Every record carries a whole-line mark. When `word_diff` is given, its
/// regions become extra inline marks; their columns are shifted past the
/// `-`/`+` prefix.
pub fn build_highlighted_lines(
    hunk: &Hunk,
    file_format: FileFormat,
    word_diff: Option<&dyn WordDiff>,
) -> Vec<LineSpec> {
    let strip = |lines: &[String]| -> Vec<String> {
        lines
            .iter()
            .map(|l| match file_format {
                FileFormat::Dos => l.strip_suffix('\r').unwrap_or(l.as_str()).to_string(),
                _ => l.clone(),
            })
            .collect()
    };
    let removed = strip(&hunk.removed.lines);
    let added = strip(&hunk.added.lines);

    let sides = [
        ('-', &removed, HighlightGroup::DeletePreview),
        ('+', &added, HighlightGroup::AddPreview),
    ];

    let mut specs: Vec<LineSpec> = sides
        .iter()
        .flat_map(|(sym, lines, group)| {
            lines.iter().map(move |l| LineSpec {
                text: format!("{}{}", sym, l),
                marks: smallvec![HighlightMark::whole_line(*group)],
            })
        })
        .collect();

    let Some(word_diff) = word_diff else {
        return specs;
    };

    let (removed_regions, added_regions) = word_diff.word_diff(&removed, &added);
    let inline = removed_regions
        .iter()
        .map(|r| (r.line, r, HighlightGroup::DeleteInline))
        .chain(
            added_regions
                .iter()
                .map(|r| (hunk.removed.count + r.line, r, HighlightGroup::AddInline)),
        );

    for (index, region, group) in inline {
        if let Some(spec) = specs.get_mut(index) {
            spec.marks.push(HighlightMark {
                group,
                start_col: region.start_col + 1,
                end_col: Some(region.end_col + 1),
            });
        }
    }

    specs
}
