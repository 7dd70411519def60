use crate::VendorPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for patchguard reports.
pub const SCHEMA_REPORT_V1: &str = "patchguard.report.v1";

/// Review level for a single finding.
///
/// WARN means a human must reconcile the customization against the vendor
/// change; INFO means a local copy exists and should be eyeballed; IGNORE
/// means evidence says the change does not touch the customization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Warn,
    Info,
    Ignore,
}

impl Level {
    /// Rank for ordering: WARN sorts before INFO sorts before IGNORE.
    pub fn rank(self) -> u8 {
        match self {
            Level::Warn => 0,
            Level::Info => 1,
            Level::Ignore => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Ignore => "IGNORE",
        }
    }
}

/// Outcome of the optional auto-apply pass for a file-override finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AutoApplied {
    NotApplicable,
    Applied,
    NotApplied,
}

impl AutoApplied {
    pub fn as_str(self) -> &'static str {
        match self {
            AutoApplied::NotApplicable => "N/A",
            AutoApplied::Applied => "Yes",
            AutoApplied::NotApplied => "No",
        }
    }
}

/// One reviewable item: a (level, check type, vendor file, detail) record.
///
/// Field order is part of the report contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub level: Level,
    pub check_type: String,
    pub vendor_file: VendorPath,
    /// Local path or human-readable description of what to check.
    pub detail: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_applied: Option<AutoApplied>,

    /// Stable identifier intended for dedup and trending. A hash of
    /// `check_type + vendor_file + detail`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Inputs for external three-way diff tooling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ThreeWayDiffHint {
    pub vendor_file: VendorPath,
    pub local_file: VendorPath,
    pub base_file: VendorPath,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UndiagnosableKind {
    VirtualType,
    PluginDetection,
}

impl UndiagnosableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UndiagnosableKind::VirtualType => crate::ids::KIND_VIRTUAL_TYPE,
            UndiagnosableKind::PluginDetection => crate::ids::KIND_PLUGIN_DETECTION,
        }
    }
}

/// A patch file the resolver could not understand. These are collected for
/// human triage instead of producing possibly-wrong findings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UndiagnosableFile {
    pub vendor_file: VendorPath,
    pub kind: UndiagnosableKind,
    pub message: String,
    /// Re-serialized patch text for this file, for bug reports.
    pub patch: String,
}

/// Completion category for the whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// No warnings, nothing undiagnosable.
    Clean,
    /// At least one WARN finding; every file was diagnosed.
    Findings,
    /// At least one file could not be diagnosed.
    Undiagnosable,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LevelCounts {
    pub warn: u32,
    pub info: u32,
    pub ignore: u32,
}

impl LevelCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut counts = LevelCounts::default();
        for f in findings {
            match f.level {
                Level::Warn => counts.warn += 1,
                Level::Info => counts.info += 1,
                Level::Ignore => counts.ignore += 1,
            }
        }
        counts
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Run-level summary payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunData {
    pub files_total: u32,
    pub files_analysed: u32,
    pub files_skipped: u32,
}

/// The emitted report envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub status: RunStatus,
    pub counts: LevelCounts,
    pub findings: Vec<Finding>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub undiagnosable: Vec<UndiagnosableFile>,
    /// Non-fatal warnings from platform bootstrap (schema discovery etc).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boot_warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub threeway: Vec<ThreeWayDiffHint>,
    pub data: RunData,
}

pub type PatchguardReport = ReportEnvelope;
