//! Stable DTOs and IDs used across the patchguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report envelope
//! - stable check-type IDs
//! - canonical vendor-relative path handling
//! - explain registry for reviewer guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod path;
pub mod report;

pub use explain::{Explanation, lookup_explanation};
pub use path::VendorPath;
pub use report::{
    AutoApplied, Finding, Level, LevelCounts, PatchguardReport, ReportEnvelope, RunData, RunStatus,
    ThreeWayDiffHint, ToolMeta, UndiagnosableFile, UndiagnosableKind, SCHEMA_REPORT_V1,
};
