use crate::hunk::{Hunk, HunkKind, NO_NEWLINE_MARKER};

/// Placeholder object ids; the patch is only ever applied locally
const INDEX_PLACEHOLDER: &str = "index 000000..000000";

/// A serialized patch together with the hunks it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Unified-diff text, one entry per line
    pub lines: Vec<String>,

    /// The input hunks with `removed.start` moved to its offset-adjusted value
    pub hunks: Vec<Hunk>,
}

impl Patch {
    /// The patch as a single string, newline terminated
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// Serialize `hunks` into a unified diff for `relpath`
///
/// Each header's new-side start is the old start shifted by the net lines
/// added by all preceding hunks. With `invert` the sides are swapped, giving a
/// patch that reverses the hunks. The input is left untouched; the adjusted
/// hunks are returned in [`Patch::hunks`].
pub fn create_patch(relpath: &str, hunks: &[Hunk], mode_bits: &str, invert: bool) -> Patch {
    let mut lines = vec![
        format!("diff --git a/{} b/{}", relpath, relpath),
        format!("{} {}", INDEX_PLACEHOLDER, mode_bits),
        format!("--- a/{}", relpath),
        format!("+++ b/{}", relpath),
    ];

    let mut offset: i64 = 0;
    let mut adjusted = Vec::with_capacity(hunks.len());

    for hunk in hunks {
        let mut start = hunk.removed.start as i64;
        // git anchors an insertion after the old line; apply wants the line itself
        if hunk.kind == HunkKind::Add {
            start += 1;
        }

        let (mut pre, mut now) = (&hunk.removed, &hunk.added);
        if invert {
            std::mem::swap(&mut pre, &mut now);
        }

        lines.push(format!(
            "@@ -{},{} +{},{} @@",
            start,
            pre.count,
            start + offset,
            now.count
        ));

        lines.extend(pre.lines.iter().map(|l| format!("-{}", l)));
        if pre.no_newline_at_eof {
            lines.push(NO_NEWLINE_MARKER.to_string());
        }

        lines.extend(now.lines.iter().map(|l| format!("+{}", l)));
        if now.no_newline_at_eof {
            lines.push(NO_NEWLINE_MARKER.to_string());
        }

        let mut hunk = hunk.clone();
        hunk.removed.start = (start + offset).max(0) as usize;
        adjusted.push(hunk);

        offset += now.count as i64 - pre.count as i64;
    }

    Patch {
        lines,
        hunks: adjusted,
    }
}
