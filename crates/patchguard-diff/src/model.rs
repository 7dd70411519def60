use patchguard_types::VendorPath;

/// All changes the upgrade made to a single vendor file.
///
/// Hunks are ordered by ascending old-file position and never overlap; the
/// parser enforces both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchFile {
    pub path: VendorPath,
    pub hunks: Vec<Hunk>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hunk {
    /// 1-based first line in the old file.
    pub old_start: u32,
    pub old_lines: u32,
    /// 1-based first line in the new file.
    pub new_start: u32,
    pub new_lines: u32,
    pub ops: Vec<LineOp>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    Context,
    Add,
    Remove,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineOp {
    pub kind: LineKind,
    pub text: String,
}

impl LineOp {
    pub fn context<S: Into<String>>(text: S) -> Self {
        LineOp { kind: LineKind::Context, text: text.into() }
    }

    pub fn add<S: Into<String>>(text: S) -> Self {
        LineOp { kind: LineKind::Add, text: text.into() }
    }

    pub fn remove<S: Into<String>>(text: S) -> Self {
        LineOp { kind: LineKind::Remove, text: text.into() }
    }
}

impl Hunk {
    /// The old-file side of the hunk: context + removed line texts in order.
    pub fn old_side(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter(|op| matches!(op.kind, LineKind::Context | LineKind::Remove))
            .map(|op| op.text.as_str())
            .collect()
    }

    /// The new-file side of the hunk: context + added line texts in order.
    pub fn new_side(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter(|op| matches!(op.kind, LineKind::Context | LineKind::Add))
            .map(|op| op.text.as_str())
            .collect()
    }

    /// Texts of the lines the hunk actually changes (added or removed).
    pub fn changed_lines(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter(|op| matches!(op.kind, LineKind::Add | LineKind::Remove))
            .map(|op| op.text.as_str())
            .collect()
    }
}

impl PatchFile {
    /// True when none of the hunks add or remove anything (pure context is
    /// possible with zero-count headers).
    pub fn is_noop(&self) -> bool {
        self.hunks.iter().all(|h| h.changed_lines().is_empty())
    }
}

impl std::fmt::Display for PatchFile {
    /// Re-serializes the patch in unified-diff form. Line operations and
    /// counts round-trip through `parse` structurally.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- a/{}", self.path)?;
        writeln!(f, "+++ b/{}", self.path)?;
        for hunk in &self.hunks {
            writeln!(
                f,
                "@@ -{},{} +{},{} @@",
                hunk.old_start, hunk.old_lines, hunk.new_start, hunk.new_lines
            )?;
            for op in &hunk.ops {
                let prefix = match op.kind {
                    LineKind::Context => ' ',
                    LineKind::Add => '+',
                    LineKind::Remove => '-',
                };
                writeln!(f, "{}{}", prefix, op.text)?;
            }
        }
        Ok(())
    }
}
