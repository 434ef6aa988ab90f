use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::hunk::{Hunk, HunkKind};

/// Line totals for a status display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[display(fmt = "+{} ~{} -{}", added, changed, removed)]
pub struct Summary {
    pub added: usize,
    pub changed: usize,
    pub removed: usize,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.changed == 0 && self.removed == 0
    }
}

/// Reduce a hunk list to added/changed/removed totals
///
/// A change hunk counts its paired lines as changed and the remainder of the
/// longer side as added or removed.
pub fn get_summary(hunks: &[Hunk]) -> Summary {
    let mut summary = Summary::default();

    for hunk in hunks {
        let (added, removed) = (hunk.added.count, hunk.removed.count);
        match hunk.kind {
            HunkKind::Add => summary.added += added,
            HunkKind::Delete => summary.removed += removed,
            HunkKind::Change => {
                let delta = added.min(removed);
                summary.changed += delta;
                summary.added += added - delta;
                summary.removed += removed - delta;
            }
        }
    }

    summary
}
