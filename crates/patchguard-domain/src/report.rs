//! Aggregated outcome of a classification run, before rendering.

use patchguard_types::{
    Finding, LevelCounts, RunData, RunStatus, ThreeWayDiffHint, UndiagnosableFile,
};

/// Everything the analysis produced for one patch set.
#[derive(Debug, Clone, Default)]
pub struct DomainReport {
    pub findings: Vec<Finding>,
    pub undiagnosable: Vec<UndiagnosableFile>,
    pub threeway: Vec<ThreeWayDiffHint>,
    pub data: RunData,
}

impl DomainReport {
    pub fn counts(&self) -> LevelCounts {
        LevelCounts::from_findings(&self.findings)
    }

    /// Overall run status. Undiagnosable files dominate: a run that could
    /// not analyse everything is never reported as clean or merely noisy.
    pub fn status(&self) -> RunStatus {
        if !self.undiagnosable.is_empty() {
            RunStatus::Undiagnosable
        } else if self.counts().warn > 0 {
            RunStatus::Findings
        } else {
            RunStatus::Clean
        }
    }
}
