use hunk_diff::{
    create_hunk, create_patch, parse_diff_line, parse_unified_diff, BufferDiff, HunkKind, ParseError,
};
use pretty_assertions::assert_eq;

#[test]
fn test_create_add_hunk() {
    let hunk = create_hunk(10, 0, 10, 3);

    assert_eq!(hunk.kind, HunkKind::Add);
    assert_eq!(hunk.header, "@@ -10 +10,3 @@");
    assert_eq!(hunk.vend, 12);
    assert_eq!(hunk.removed.start, 10);
    assert_eq!(hunk.removed.count, 0);
    assert_eq!(hunk.added.start, 10);
    assert_eq!(hunk.added.count, 3);
    assert!(hunk.removed.lines.is_empty());
    assert!(hunk.added.lines.is_empty());
}

#[test]
fn test_create_delete_hunk() {
    let hunk = create_hunk(5, 2, 5, 0);

    assert_eq!(hunk.kind, HunkKind::Delete);
    assert_eq!(hunk.header, "@@ -5,2 +5 @@");
    // A delete touches only its anchor line
    assert_eq!(hunk.vend, 5);
    assert_eq!(hunk.change_end(), 5);
}

#[test]
fn test_create_change_hunk() {
    let hunk = create_hunk(3, 2, 3, 4);

    assert_eq!(hunk.kind, HunkKind::Change);
    assert_eq!(hunk.header, "@@ -3,2 +3,4 @@");
    assert_eq!(hunk.vend, 6);
    assert_eq!(hunk.change_end(), 4);
    assert_eq!(hunk.delta(), 2);
}

#[test]
fn test_kind_from_counts() {
    assert_eq!(create_hunk(0, 0, 1, 1).kind, HunkKind::Add);
    assert_eq!(create_hunk(1, 1, 0, 0).kind, HunkKind::Delete);
    assert_eq!(create_hunk(1, 1, 1, 1).kind, HunkKind::Change);
    // Both sides empty has no added lines, so it is a delete
    assert_eq!(create_hunk(0, 0, 0, 0).kind, HunkKind::Delete);
}

#[test]
fn test_parse_diff_line() {
    let line = "@@ -1,3 +1,5 @@ context";
    let hunk = parse_diff_line(line).unwrap();

    assert_eq!(hunk.removed.start, 1);
    assert_eq!(hunk.removed.count, 3);
    assert_eq!(hunk.added.start, 1);
    assert_eq!(hunk.added.count, 5);
    assert_eq!(hunk.kind, HunkKind::Change);
    assert_eq!(hunk.vend, 5);
    assert_eq!(hunk.header, line);
}

#[test]
fn test_parse_diff_line_default_counts() {
    let hunk = parse_diff_line("@@ -7 +7 @@").unwrap();

    assert_eq!((hunk.removed.start, hunk.removed.count), (7, 1));
    assert_eq!((hunk.added.start, hunk.added.count), (7, 1));
    assert_eq!(hunk.kind, HunkKind::Change);
}

#[test]
fn test_parse_diff_line_zero_counts() {
    let add = parse_diff_line("@@ -0,0 +1,2 @@").unwrap();
    assert_eq!(add.kind, HunkKind::Add);
    assert_eq!(add.removed.start, 0);
    assert_eq!(add.vend, 2);

    let delete = parse_diff_line("@@ -4,2 +3,0 @@ fn main() {").unwrap();
    assert_eq!(delete.kind, HunkKind::Delete);
    assert_eq!(delete.added.start, 3);
    assert_eq!(delete.header, "@@ -4,2 +3,0 @@ fn main() {");
}

#[test]
fn test_parse_diff_line_errors() {
    assert_eq!(
        parse_diff_line("@@ -1,3 +1,5"),
        Err(ParseError::MissingMarker("@@ -1,3 +1,5".to_string()))
    );
    assert_eq!(
        parse_diff_line("-1,3 +1,5 @@"),
        Err(ParseError::MissingMarker("-1,3 +1,5 @@".to_string()))
    );
    assert_eq!(
        parse_diff_line("@@ -a,3 +1 @@"),
        Err(ParseError::InvalidNumber("-a,3".to_string()))
    );
    assert_eq!(
        parse_diff_line("@@ -1,3 +1,x @@"),
        Err(ParseError::InvalidNumber("+1,x".to_string()))
    );
    assert_eq!(
        parse_diff_line("@@ 1,3 +1 @@"),
        Err(ParseError::MalformedRange("1,3".to_string()))
    );
    assert_eq!(
        parse_diff_line("@@ @@"),
        Err(ParseError::MalformedRange(String::new()))
    );
}

#[test]
fn test_parse_error_display() {
    let err = parse_diff_line("@@ -1 +1").unwrap_err();
    assert!(err.to_string().starts_with("missing closing '@@' marker"));
}

#[test]
fn test_parse_unified_diff() {
    let text = "\
diff --git a/f.txt b/f.txt
index 1111111..2222222 100644
--- a/f.txt
+++ b/f.txt
@@ -2 +2 @@
-old two
+new two
@@ -5,0 +6,2 @@ fn tail()
+six
+seven
\\ No newline at end of file
";

    let hunks = parse_unified_diff(text).unwrap();
    assert_eq!(hunks.len(), 2);

    assert_eq!(hunks[0].kind, HunkKind::Change);
    assert_eq!(hunks[0].removed.lines, vec!["old two"]);
    assert_eq!(hunks[0].added.lines, vec!["new two"]);
    assert!(!hunks[0].removed.no_newline_at_eof);
    assert!(!hunks[0].added.no_newline_at_eof);

    assert_eq!(hunks[1].kind, HunkKind::Add);
    assert_eq!(hunks[1].header, "@@ -5,0 +6,2 @@ fn tail()");
    assert_eq!(hunks[1].removed.start, 5);
    assert_eq!(hunks[1].added.start, 6);
    assert_eq!(hunks[1].added.lines, vec!["six", "seven"]);
    assert!(hunks[1].added.no_newline_at_eof);
    assert!(!hunks[1].removed.no_newline_at_eof);
}

#[test]
fn test_parse_unified_diff_marker_on_removed_side() {
    let text = "\
@@ -3 +3 @@
-last
\\ No newline at end of file
+last
";

    let hunks = parse_unified_diff(text).unwrap();
    assert!(hunks[0].removed.no_newline_at_eof);
    assert!(!hunks[0].added.no_newline_at_eof);
}

#[test]
fn test_parse_unified_diff_rejects_bad_header() {
    let text = "@@ -1 +1 @@\n-a\n+b\n@@ -x +4 @@\n";
    assert_eq!(
        parse_unified_diff(text),
        Err(ParseError::InvalidNumber("-x".to_string()))
    );
}

#[test]
fn test_parse_unified_diff_keeps_carriage_returns() {
    let diff = BufferDiff::new("a\r\nb\r\n", "a\r\nB\r\n").unwrap();
    let text = diff.patch("crlf.txt", "100644", false).to_text();

    let hunks = parse_unified_diff(&text).unwrap();
    assert_eq!(hunks[0].removed.lines, vec!["b\r"]);
    assert_eq!(hunks[0].added.lines, vec!["B\r"]);
    assert_eq!(hunks, diff.hunks());

    let regenerated = create_patch("crlf.txt", &hunks, "100644", false).to_text();
    assert_eq!(regenerated, text);
    assert!(regenerated.contains("-b\r\n+B\r\n"));
}

#[test]
fn test_parse_unified_diff_stops_at_header_counts() {
    let text = "\
diff --git a/x b/x
--- a/x
+++ b/x
@@ -1 +1 @@
-a
+b
diff --git a/y b/y
--- a/y
+++ b/y
@@ -3,0 +4,2 @@
+c
+d
";

    let hunks = parse_unified_diff(text).unwrap();
    assert_eq!(hunks.len(), 2);

    assert_eq!(hunks[0].removed.lines, vec!["a"]);
    assert_eq!(hunks[0].added.lines, vec!["b"]);
    assert_eq!(hunks[1].added.lines, vec!["c", "d"]);
    assert!(hunks[1].removed.lines.is_empty());

    for hunk in &hunks {
        assert_eq!(hunk.removed.lines.len(), hunk.removed.count);
        assert_eq!(hunk.added.lines.len(), hunk.added.count);
    }
}
