use log::trace;

use crate::hunk::Hunk;

/// Cheap change check between two hunk lists, by header
///
/// Returns `true` when exactly one list is absent, the lengths differ, or any
/// pair of headers at the same index differs.
pub fn compare_heads(a: Option<&[Hunk]>, b: Option<&[Hunk]>) -> bool {
    match (a, b) {
        (None, None) => false,
        (Some(a), Some(b)) => {
            a.len() != b.len() || a.iter().zip(b).any(|(ah, bh)| ah.header != bh.header)
        }
        _ => true,
    }
}

/// Whether two hunks produce the same new-file content
fn same_added(a: &Hunk, b: &Hunk) -> bool {
    a.added.start == b.added.start
        && a.added.count == b.added.count
        && (0..a.added.count).all(|i| a.added.lines.get(i) == b.added.lines.get(i))
}

/// Drop the hunks of `a` whose new-file content is reproduced exactly by `b`
///
/// Both lists must be ascending by `added.start`. Old-side anchors are not
/// compared, so a working-tree hunk already implied by a staged hunk is
/// removed even when the two diffs start from different bases.
pub fn filter_common(a: &[Hunk], b: &[Hunk]) -> Vec<Hunk> {
    let mut ret = Vec::with_capacity(a.len());
    let (mut i, mut j) = (0, 0);

    while let (Some(ah), Some(bh)) = (a.get(i), b.get(j)) {
        if ah.added.start > bh.added.start {
            j += 1;
        } else if ah.added.start < bh.added.start {
            ret.push(ah.clone());
            i += 1;
        } else {
            if same_added(ah, bh) {
                trace!("Dropping hunk {:?} shared with {:?}", ah.header, bh.header);
            } else {
                ret.push(ah.clone());
            }
            i += 1;
            j += 1;
        }
    }

    ret.extend(a.iter().skip(i).cloned());
    ret
}
