// Hunk arithmetic for change annotation
// This crate turns line-diff hunks into gutter signs, partial hunks for
// range staging, patch text, summaries and preview highlights

mod buffer_diff;
mod compare;
mod config;
mod error;
mod highlight;
mod hunk;
mod locate;
mod partial;
mod patch;
mod signs;
mod summary;
mod word_diff;

pub use buffer_diff::{BufferDiff, BufferDiffSnapshot};
pub use compare::{compare_heads, filter_common};
pub use config::DiffConfig;
pub use error::ParseError;
pub use highlight::{build_highlighted_lines, FileFormat, HighlightGroup, HighlightMark, LineSpec};
pub use hunk::{
    create_hunk, format_header, parse_diff_line, parse_unified_diff, Hunk, HunkKind, Node,
    NO_NEWLINE_MARKER,
};
pub use locate::{find_hunk, find_nearest_hunk, Direction};
pub use partial::create_partial_hunk;
pub use patch::{create_patch, Patch};
pub use signs::{
    BaselineSigns, LineWindow, RefinedSigns, Sign, SignAlgorithm, SignCalculator, SignKind,
    SignStrategy,
};
pub use summary::{get_summary, Summary};
pub use word_diff::{Granularity, Region, SimilarWordDiff, WordDiff};

// Re-exported so callers can configure the line diff without a direct dependency
pub use similar::Algorithm;
