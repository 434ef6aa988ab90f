use crate::hunk::{create_hunk, Hunk};

/// How a hunk relates to a new-file line range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlap {
    /// The range contains the whole hunk
    Contains,
    /// The range's top edge cuts into the hunk
    TopIntersects,
    /// The range's bottom edge cuts into the hunk
    BottomIntersects,
    /// The range lies inside the hunk
    Within,
    /// No shared lines
    Disjoint,
}

fn classify(hunk: &Hunk, top: usize, bot: usize) -> Overlap {
    let start = hunk.added.start;
    let vend = hunk.vend;

    if start >= top && vend <= bot {
        Overlap::Contains
    } else if start >= top && start <= bot {
        Overlap::TopIntersects
    } else if vend >= top && vend <= bot {
        Overlap::BottomIntersects
    } else if start <= top && vend >= bot {
        Overlap::Within
    } else {
        Overlap::Disjoint
    }
}

/// Derive the single hunk representing the edits inside new-file lines `top..=bot`
///
/// `hunks` must be ascending and non-overlapping in new-file coordinates.
/// Returns `None` when no hunk touches the range or when `bot < top`.
pub fn create_partial_hunk(hunks: &[Hunk], top: usize, bot: usize) -> Option<Hunk> {
    if bot < top {
        return None;
    }

    let (top_i, bot_i) = (top as i64, bot as i64);
    let mut pre_top = top_i;
    let mut pre_count = bot_i - top_i + 1;
    let mut touched = false;

    for hunk in hunks {
        let added_in_hunk = hunk.delta();
        // The old side ends where the new side would if nothing were added
        let old_end = hunk.added.start as i64 + hunk.removed.count as i64;
        let added_above_bot = (bot_i + 1 - old_end).max(0);
        let added_above_top = (top_i - old_end).max(0);

        let overlap = classify(hunk, top, bot);
        let added_in_range = match overlap {
            Overlap::Contains => added_in_hunk,
            Overlap::TopIntersects => added_above_bot,
            Overlap::BottomIntersects => {
                pre_top -= added_above_top;
                added_in_hunk - added_above_top
            }
            Overlap::Within => {
                pre_top -= added_above_top;
                added_above_bot - added_above_top
            }
            Overlap::Disjoint => {
                if top > hunk.vend {
                    pre_top -= added_in_hunk;
                }
                0
            }
        };

        touched |= overlap != Overlap::Disjoint;
        pre_count -= added_in_range;
    }

    if !touched {
        return None;
    }

    if pre_count == 0 {
        pre_top -= 1;
    }

    Some(create_hunk(
        pre_top.max(0) as usize,
        pre_count.max(0) as usize,
        top,
        bot - top + 1,
    ))
}
