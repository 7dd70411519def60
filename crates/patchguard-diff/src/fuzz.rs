use crate::model::{Hunk, LineKind};

/// Where and how a hunk matched the local content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HunkMatch {
    /// 0-based index into the local lines where the (trimmed) old side matched.
    pub pos: usize,
    /// Context lines trimmed from the front of the pattern.
    pub trim_front: usize,
    /// Context lines trimmed from the back of the pattern.
    pub trim_back: usize,
}

/// Locate the hunk's old side (context + removed lines) within `local`,
/// tolerating up to `fuzz` mismatched context lines trimmed from each end.
///
/// The search tries the declared offset with the full pattern first, then
/// progressively relaxes: widening the search window around the declared
/// offset, then trimming leading/trailing context. A larger `fuzz` therefore
/// never matches fewer hunks than a smaller one.
pub fn match_hunk(local: &[String], hunk: &Hunk, fuzz: usize) -> Option<HunkMatch> {
    match_hunk_at(local, hunk, fuzz, declared_pos(hunk))
}

/// As [`match_hunk`], but anchored at `anchor` instead of the hunk's declared
/// offset. Used when earlier hunks have already shifted the file.
fn match_hunk_at(local: &[String], hunk: &Hunk, fuzz: usize, anchor: usize) -> Option<HunkMatch> {
    let pattern = hunk.old_side();
    let leading = leading_context(hunk);
    let trailing = trailing_context(hunk);

    for trim in 0..=fuzz {
        let front = trim.min(leading);
        // Front and back share the pattern; never trim past its length.
        let back = trim.min(trailing).min(pattern.len() - front);
        let slice = &pattern[front..pattern.len() - back];

        // A fully trimmed-away pattern matches anywhere; pin it to the anchor.
        if slice.is_empty() {
            let pos = (anchor + front).min(local.len());
            return Some(HunkMatch { pos, trim_front: front, trim_back: back });
        }

        if let Some(pos) = search(local, slice, anchor + front) {
            return Some(HunkMatch { pos, trim_front: front, trim_back: back });
        }

        // Trimming is saturated once both ends hit their context budget.
        if front == leading && back == trailing {
            break;
        }
    }

    None
}

/// Apply one hunk in place. Returns the match when the hunk applied; the
/// local lines are untouched when it did not. Never applies partially.
pub fn apply_hunk(
    local: &mut Vec<String>,
    hunk: &Hunk,
    fuzz: usize,
    anchor: usize,
) -> Option<HunkMatch> {
    let m = match_hunk_at(local, hunk, fuzz, anchor)?;
    let old_len = hunk.old_side().len() - m.trim_front - m.trim_back;
    let replacement = hunk.new_side();
    let replacement = replacement[m.trim_front..replacement.len() - m.trim_back]
        .iter()
        .map(|s| s.to_string());
    local.splice(m.pos..m.pos + old_len, replacement);
    Some(m)
}

/// Apply every hunk of a patch to `content`, in order, tracking the line
/// drift earlier hunks introduce. All-or-nothing: returns the patched text
/// only when every hunk applied within tolerance.
pub fn apply_hunks(content: &str, hunks: &[Hunk], fuzz: usize) -> Option<String> {
    let had_trailing_newline = content.is_empty() || content.ends_with('\n');
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

    let mut drift: isize = 0;
    for hunk in hunks {
        let anchor = declared_pos(hunk) as isize + drift;
        let anchor = anchor.max(0) as usize;
        apply_hunk(&mut lines, hunk, fuzz, anchor)?;
        drift += hunk.new_lines as isize - hunk.old_lines as isize;
    }

    let mut out = lines.join("\n");
    if had_trailing_newline && !out.is_empty() {
        out.push('\n');
    }
    Some(out)
}

fn declared_pos(hunk: &Hunk) -> usize {
    (hunk.old_start as usize).saturating_sub(1)
}

fn leading_context(hunk: &Hunk) -> usize {
    hunk.ops
        .iter()
        .take_while(|op| op.kind == LineKind::Context)
        .count()
}

fn trailing_context(hunk: &Hunk) -> usize {
    hunk.ops
        .iter()
        .rev()
        .take_while(|op| op.kind == LineKind::Context)
        .count()
}

/// Find `pattern` in `local`, preferring positions closest to `anchor`:
/// exact anchor first, then alternating below/above with growing distance.
fn search(local: &[String], pattern: &[&str], anchor: usize) -> Option<usize> {
    if pattern.len() > local.len() {
        return None;
    }
    let last = local.len() - pattern.len();
    let anchor = anchor.min(last);

    let mut candidates: Vec<usize> = vec![anchor];
    for dist in 1..=last.max(anchor) {
        if anchor >= dist {
            candidates.push(anchor - dist);
        }
        if anchor + dist <= last {
            candidates.push(anchor + dist);
        }
    }

    candidates
        .into_iter()
        .find(|&pos| matches_at(local, pattern, pos))
}

fn matches_at(local: &[String], pattern: &[&str], pos: usize) -> bool {
    pattern
        .iter()
        .zip(&local[pos..pos + pattern.len()])
        .all(|(p, l)| *p == l.as_str())
}
