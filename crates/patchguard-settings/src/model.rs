use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `patchguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so
/// forward-compat is easy. Every field can also be supplied (and overridden)
/// on the command line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PatchguardConfigV1 {
    /// Optional schema string for tooling (`patchguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Unified diff of the vendor upgrade, relative to the project directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch_file: Option<String>,

    /// Platform manifest feeding the module registry and config graph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_manifest: Option<String>,

    /// Only analyse vendor files whose path contains this substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Restrict preference/plugin findings to classes under these namespaces.
    #[serde(default)]
    pub vendor_namespaces: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_info: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_ignore: Option<bool>,

    /// Sort findings by check type instead of warnings-first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by_type: Option<bool>,

    /// Maximum fuzz for in-place auto-application of file overrides.
    /// Absent means auto-apply is off.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_apply_fuzz: Option<u32>,

    /// Emit three-way merge hint commands for file overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threeway: Option<bool>,

    /// Escalate per-file analysis failures to a fatal run error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,

    /// Root holding pristine pre-upgrade vendor sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_root: Option<String>,

    /// Documentation URL appended to the rendered summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,
}
