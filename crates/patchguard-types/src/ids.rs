//! Stable identifiers for the override-mechanism checks.
//!
//! `check_type` is a dotted namespace tag identifying which rule produced a
//! finding. These strings are part of the report contract; renaming one is a
//! breaking change for downstream report consumers.

// Checks
pub const CHECK_FILE_OVERRIDE: &str = "override.file";
pub const CHECK_PREFERENCE: &str = "override.preference";
pub const CHECK_PLUGIN: &str = "override.plugin";
pub const CHECK_ALIAS: &str = "override.alias";

// Undiagnosable-file kinds
pub const KIND_VIRTUAL_TYPE: &str = "virtual_type";
pub const KIND_PLUGIN_DETECTION: &str = "plugin_detection";

pub const ALL_CHECKS: &[&str] = &[
    CHECK_FILE_OVERRIDE,
    CHECK_PREFERENCE,
    CHECK_PLUGIN,
    CHECK_ALIAS,
];
