use hunk_diff::{create_hunk, Hunk};
use proptest::prelude::*;

/// Lay out edits as a well-formed zero-context hunk list
///
/// Each edit is `(gap, old_count, new_count)`: `gap` unchanged lines precede
/// the edit, so neighbouring hunks never touch.
pub fn hunks_from_edits(edits: &[(usize, usize, usize)]) -> Vec<Hunk> {
    let (mut old_pos, mut new_pos) = (0, 0);
    let mut hunks = Vec::with_capacity(edits.len());

    for &(gap, old_count, new_count) in edits {
        old_pos += gap;
        new_pos += gap;

        let old_start = if old_count > 0 { old_pos + 1 } else { old_pos };
        let new_start = if new_count > 0 { new_pos + 1 } else { new_pos };
        hunks.push(create_hunk(old_start, old_count, new_start, new_count));

        old_pos += old_count;
        new_pos += new_count;
    }

    hunks
}

/// Random well-formed hunk lists
#[allow(dead_code)]
pub fn hunk_list() -> impl Strategy<Value = Vec<Hunk>> {
    let edit = (1usize..6, 0usize..5, 0usize..5)
        .prop_filter("an edit changes something", |&(_, old, new)| old + new > 0);
    prop::collection::vec(edit, 0..12).prop_map(|edits| hunks_from_edits(&edits))
}
