mod common;

use hunk_diff::{create_hunk, get_summary, HunkKind, Summary};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_summary_per_kind() {
    let hunks = vec![
        create_hunk(1, 0, 2, 3),  // add 3
        create_hunk(5, 2, 7, 0),  // delete 2
        create_hunk(9, 2, 8, 5),  // 2 changed, 3 added
        create_hunk(20, 4, 22, 1), // 1 changed, 3 removed
    ];

    assert_eq!(
        get_summary(&hunks),
        Summary {
            added: 6,
            changed: 3,
            removed: 5,
        }
    );
}

#[test]
fn test_summary_empty() {
    let summary = get_summary(&[]);

    assert_eq!(summary, Summary::default());
    assert!(summary.is_empty());
}

#[test]
fn test_summary_display() {
    let summary = get_summary(&[create_hunk(3, 1, 3, 2)]);
    assert_eq!(summary.to_string(), "+1 ~1 -0");
}

proptest! {
    #[test]
    fn prop_summary_matches_per_hunk_contributions(hunks in common::hunk_list()) {
        let summary = get_summary(&hunks);

        let mut expected = Summary::default();
        for hunk in &hunks {
            match hunk.kind {
                HunkKind::Add => expected.added += hunk.added.count,
                HunkKind::Delete => expected.removed += hunk.removed.count,
                HunkKind::Change => {
                    let paired = hunk.added.count.min(hunk.removed.count);
                    expected.changed += paired;
                    expected.added += hunk.added.count - paired;
                    expected.removed += hunk.removed.count - paired;
                }
            }
        }
        prop_assert_eq!(summary, expected);

        // Every new line is added or changed, every old line removed or changed
        let new_lines: usize = hunks.iter().map(|h| h.added.count).sum();
        let old_lines: usize = hunks.iter().map(|h| h.removed.count).sum();
        prop_assert_eq!(summary.added + summary.changed, new_lines);
        prop_assert_eq!(summary.removed + summary.changed, old_lines);

        prop_assert_eq!(get_summary(&hunks), summary);
    }
}
