use patchguard_types::{
    Finding, Level, LevelCounts, RunData, ThreeWayDiffHint, UndiagnosableFile,
};

/// Everything the renderers need, with presentation knobs resolved.
///
/// `findings` is always the *full* set; the visibility flags only affect
/// which rows are printed, never the counts.
#[derive(Clone, Debug)]
pub struct RenderableReport {
    pub findings: Vec<Finding>,
    pub undiagnosable: Vec<UndiagnosableFile>,
    pub threeway: Vec<ThreeWayDiffHint>,
    pub boot_warnings: Vec<String>,
    pub data: RunData,
    pub show_info: bool,
    pub show_ignore: bool,
    /// The run was in auto-apply mode, so the outcome column is rendered.
    pub auto_apply: bool,
    pub docs_url: Option<String>,
}

impl RenderableReport {
    pub fn counts(&self) -> LevelCounts {
        LevelCounts::from_findings(&self.findings)
    }

    pub fn visible(&self, level: Level) -> bool {
        match level {
            Level::Warn => true,
            Level::Info => self.show_info,
            Level::Ignore => self.show_ignore,
        }
    }

    pub fn visible_findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|f| self.visible(f.level))
    }
}
