use crate::model::{Hunk, LineOp, PatchFile};
use patchguard_types::VendorPath;

/// Malformed diff syntax. Parsing is all-or-nothing over the whole document;
/// none of these is recoverable per file.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: `---` header without a matching `+++` header")]
    IncompleteFileHeader { line: usize },

    #[error("line {line}: cannot parse hunk header: {text}")]
    BadHunkHeader { line: usize, text: String },

    #[error(
        "line {line}: hunk line counts disagree with header \
         (expected -{old_expected}/+{new_expected}, got -{old_seen}/+{new_seen})"
    )]
    CountMismatch {
        line: usize,
        old_expected: u32,
        new_expected: u32,
        old_seen: u32,
        new_seen: u32,
    },

    #[error("line {line}: hunk at old line {start} overlaps the previous hunk")]
    OverlappingHunks { line: usize, start: u32 },
}

/// Parse unified-diff text into ordered per-file patches.
///
/// Empty input yields an empty sequence, not an error; the caller decides
/// whether that is fatal. Lines between file sections that are not part of
/// the grammar (`diff -urN ...`, `index ...`, `Only in ...`) are skipped.
pub fn parse(text: &str) -> Result<Vec<PatchFile>, ParseError> {
    let mut files: Vec<PatchFile> = Vec::new();
    let lines: Vec<&str> = text.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let Some(old_header) = line.strip_prefix("--- ") else {
            i += 1;
            continue;
        };
        let new_header = lines
            .get(i + 1)
            .and_then(|l| l.strip_prefix("+++ "))
            .ok_or(ParseError::IncompleteFileHeader { line: i + 1 })?;

        let path = header_path(new_header, old_header);
        i += 2;

        let mut hunks: Vec<Hunk> = Vec::new();
        while i < lines.len() && lines[i].starts_with("@@") {
            let (hunk, consumed) = parse_hunk(&lines, i)?;
            if let Some(prev) = hunks.last() {
                if hunk.old_start < prev.old_start + prev.old_lines {
                    return Err(ParseError::OverlappingHunks {
                        line: i + 1,
                        start: hunk.old_start,
                    });
                }
            }
            i += consumed;
            hunks.push(hunk);
        }

        files.push(PatchFile {
            path: VendorPath::new(path),
            hunks,
        });
    }

    Ok(files)
}

/// Resolve the file path from the header pair, preferring the `+++` side and
/// falling back to `---` when the new side is `/dev/null` (deleted file).
/// The `a/`/`b/` prefix convention and any trailing timestamp are stripped.
fn header_path<'a>(new_header: &'a str, old_header: &'a str) -> &'a str {
    let new_path = strip_header_decoration(new_header, "b/");
    if new_path != "/dev/null" {
        return new_path;
    }
    strip_header_decoration(old_header, "a/")
}

fn strip_header_decoration<'a>(header: &'a str, prefix: &str) -> &'a str {
    // `diff -urN` appends a tab plus mtime after the path.
    let path = header.split('\t').next().unwrap_or(header);
    path.strip_prefix(prefix).unwrap_or(path)
}

fn parse_hunk(lines: &[&str], at: usize) -> Result<(Hunk, usize), ParseError> {
    let header = lines[at];
    let (old_start, old_lines, new_start, new_lines) =
        parse_hunk_header(header).ok_or_else(|| ParseError::BadHunkHeader {
            line: at + 1,
            text: header.to_string(),
        })?;

    let mut ops: Vec<LineOp> = Vec::new();
    let mut old_seen: u32 = 0;
    let mut new_seen: u32 = 0;
    let mut i = at + 1;

    while (old_seen < old_lines || new_seen < new_lines) && i < lines.len() {
        let body = lines[i];
        let op = if let Some(text) = body.strip_prefix(' ') {
            old_seen += 1;
            new_seen += 1;
            LineOp::context(text)
        } else if let Some(text) = body.strip_prefix('+') {
            new_seen += 1;
            LineOp::add(text)
        } else if let Some(text) = body.strip_prefix('-') {
            old_seen += 1;
            LineOp::remove(text)
        } else if body.is_empty() {
            // Some diff producers emit a bare newline for empty context lines.
            old_seen += 1;
            new_seen += 1;
            LineOp::context("")
        } else {
            // Any other line terminates the hunk body.
            break;
        };
        ops.push(op);
        i += 1;
    }

    if old_seen != old_lines || new_seen != new_lines {
        return Err(ParseError::CountMismatch {
            line: at + 1,
            old_expected: old_lines,
            new_expected: new_lines,
            old_seen,
            new_seen,
        });
    }

    Ok((
        Hunk {
            old_start,
            old_lines,
            new_start,
            new_lines,
            ops,
        },
        i - at,
    ))
}

/// `@@ -oldStart[,oldLines] +newStart[,newLines] @@ ...`
/// An omitted count defaults to 1, per the unified-diff grammar.
fn parse_hunk_header(line: &str) -> Option<(u32, u32, u32, u32)> {
    let rest = line.strip_prefix("@@ -")?;
    let (old_part, rest) = rest.split_once(" +")?;
    let (new_part, _) = rest.split_once(" @@")?;
    let (old_start, old_lines) = parse_range(old_part)?;
    let (new_start, new_lines) = parse_range(new_part)?;
    Some((old_start, old_lines, new_start, new_lines))
}

fn parse_range(part: &str) -> Option<(u32, u32)> {
    match part.split_once(',') {
        Some((start, count)) => Some((start.parse().ok()?, count.parse().ok()?)),
        None => Some((part.parse().ok()?, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineKind;

    const SIMPLE: &str = "\
--- a/vendor/acme/module-checkout/Model/Cart.php\t2024-01-01 00:00:00
+++ b/vendor/acme/module-checkout/Model/Cart.php\t2024-06-01 00:00:00
@@ -10,3 +10,4 @@ public function execute()
 context one
-removed line
+added line
+another added
 context two
";

    #[test]
    fn parses_headers_hunks_and_ops() {
        let files = parse(SIMPLE).expect("parse");
        assert_eq!(files.len(), 1);
        let file = &files[0];
        assert_eq!(
            file.path.as_str(),
            "vendor/acme/module-checkout/Model/Cart.php"
        );
        assert_eq!(file.hunks.len(), 1);
        let hunk = &file.hunks[0];
        assert_eq!((hunk.old_start, hunk.old_lines), (10, 3));
        assert_eq!((hunk.new_start, hunk.new_lines), (10, 4));
        assert_eq!(hunk.ops.len(), 5);
        assert_eq!(hunk.ops[1].kind, LineKind::Remove);
        assert_eq!(hunk.ops[2].text, "added line");
    }

    #[test]
    fn empty_input_is_empty_sequence() {
        assert_eq!(parse("").expect("parse"), Vec::new());
    }

    #[test]
    fn junk_between_files_is_skipped() {
        let text = format!("diff -urN a b\nOnly in vendor: foo\n{SIMPLE}index 123\n");
        let files = parse(&text).expect("parse");
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn incomplete_header_pair_is_an_error() {
        let err = parse("--- a/some/file.php\n@@ -1,1 +1,1 @@\n x\n").unwrap_err();
        assert!(matches!(err, ParseError::IncompleteFileHeader { .. }));
    }

    #[test]
    fn bad_hunk_header_is_an_error() {
        let text = "--- a/f\n+++ b/f\n@@ -x,1 +1,1 @@\n x\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, ParseError::BadHunkHeader { .. }));
    }

    #[test]
    fn short_hunk_body_is_a_count_mismatch() {
        let text = "--- a/f\n+++ b/f\n@@ -1,3 +1,3 @@\n one\n-two\n+TWO\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(
            err,
            ParseError::CountMismatch {
                old_expected: 3,
                old_seen: 2,
                ..
            }
        ));
    }

    #[test]
    fn foreign_line_inside_hunk_body_is_a_count_mismatch() {
        let text = "--- a/f\n+++ b/f\n@@ -1,2 +1,2 @@\n one\nnot a diff line\n two\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, ParseError::CountMismatch { .. }));
    }

    #[test]
    fn overlapping_hunks_are_rejected() {
        let text = "\
--- a/f
+++ b/f
@@ -1,3 +1,3 @@
 a
-b
+B
 c
@@ -2,2 +2,2 @@
 b
 c
";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, ParseError::OverlappingHunks { start: 2, .. }));
    }

    #[test]
    fn omitted_counts_default_to_one() {
        let text = "--- a/f\n+++ b/f\n@@ -5 +5 @@\n-x\n+y\n";
        let files = parse(text).expect("parse");
        let hunk = &files[0].hunks[0];
        assert_eq!((hunk.old_start, hunk.old_lines), (5, 1));
        assert_eq!((hunk.new_start, hunk.new_lines), (5, 1));
    }

    #[test]
    fn deleted_file_takes_path_from_old_header() {
        let text = "--- a/vendor/acme/module-x/view/gone.phtml\n+++ /dev/null\n@@ -1,1 +0,0 @@\n-bye\n";
        let files = parse(text).expect("parse");
        assert_eq!(files[0].path.as_str(), "vendor/acme/module-x/view/gone.phtml");
    }

    #[test]
    fn multiple_files_keep_input_order() {
        let text = "\
--- a/vendor/one.phtml
+++ b/vendor/one.phtml
@@ -1,1 +1,1 @@
-a
+b
--- a/vendor/two.phtml
+++ b/vendor/two.phtml
@@ -1,1 +1,1 @@
-c
+d
";
        let files = parse(text).expect("parse");
        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["vendor/one.phtml", "vendor/two.phtml"]);
    }

    #[test]
    fn structural_round_trip_through_display() {
        let files = parse(SIMPLE).expect("parse");
        let reparsed = parse(&files[0].to_string()).expect("reparse");
        assert_eq!(files, reparsed);
    }
}
