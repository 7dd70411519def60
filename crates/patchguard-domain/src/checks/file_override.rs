//! File-override check: a project file shadows a vendor file wholesale, so
//! every vendor change is potentially invisible to the running system.

use std::collections::BTreeSet;

use patchguard_diff::{Hunk, match_hunk};
use patchguard_types::Level;

/// Classifies an overriding copy of a changed vendor file.
///
/// `Ignore` when none of the changed vendor lines appear in the override at
/// all (the override diverged before this patch, or replaces the file with
/// unrelated content). `Info` when every hunk applies exactly, with no fuzz,
/// meaning the override tracks the vendor file closely enough that the
/// change slots straight in. `Warn` otherwise.
pub fn classify(hunks: &[Hunk], local: &str) -> Level {
    let local_lines: Vec<String> = local.lines().map(str::to_string).collect();

    let present: BTreeSet<&str> = local_lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();

    let intersects = hunks
        .iter()
        .flat_map(Hunk::changed_lines)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .any(|line| present.contains(line));
    if !intersects {
        return Level::Ignore;
    }

    let clean = hunks
        .iter()
        .all(|hunk| match_hunk(&local_lines, hunk, 0).is_some());
    if clean { Level::Info } else { Level::Warn }
}
