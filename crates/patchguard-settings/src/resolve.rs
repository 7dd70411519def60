use crate::model::PatchguardConfigV1;
use patchguard_types::VendorPath;

/// Command-line overrides. `None`/empty means "not given on the CLI".
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub patch_file: Option<String>,
    pub platform_manifest: Option<String>,
    pub filter: Option<String>,
    pub vendor_namespaces: Vec<String>,
    pub show_info: bool,
    pub show_ignore: bool,
    pub sort_by_type: bool,
    pub auto_apply_fuzz: Option<u32>,
    pub threeway: bool,
    pub strict: bool,
    pub base_root: Option<String>,
}

/// Fully resolved run configuration consumed by the app layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub patch_file: String,
    pub platform_manifest: String,
    pub filter: Option<String>,
    pub vendor_namespaces: Vec<String>,
    pub show_info: bool,
    pub show_ignore: bool,
    pub sort_by_type: bool,
    pub auto_apply_fuzz: Option<usize>,
    pub threeway: bool,
    pub strict: bool,
    pub base_root: VendorPath,
    pub docs_url: Option<String>,
}

pub fn resolve_config(
    cfg: PatchguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<EffectiveConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != "patchguard.config.v1"
    {
        anyhow::bail!("unknown config schema: {schema} (expected patchguard.config.v1)");
    }

    let vendor_namespaces = if overrides.vendor_namespaces.is_empty() {
        cfg.vendor_namespaces
    } else {
        overrides.vendor_namespaces
    };
    for ns in &vendor_namespaces {
        if ns.trim().is_empty() {
            anyhow::bail!("vendor namespace entries must be non-empty");
        }
    }

    Ok(EffectiveConfig {
        patch_file: overrides
            .patch_file
            .or(cfg.patch_file)
            .unwrap_or_else(|| "vendor.patch".to_string()),
        platform_manifest: overrides
            .platform_manifest
            .or(cfg.platform_manifest)
            .unwrap_or_else(|| "platform.toml".to_string()),
        filter: overrides.filter.or(cfg.filter),
        vendor_namespaces,
        show_info: overrides.show_info || cfg.show_info.unwrap_or(false),
        show_ignore: overrides.show_ignore || cfg.show_ignore.unwrap_or(false),
        sort_by_type: overrides.sort_by_type || cfg.sort_by_type.unwrap_or(false),
        auto_apply_fuzz: overrides
            .auto_apply_fuzz
            .or(cfg.auto_apply_fuzz)
            .map(|f| f as usize),
        threeway: overrides.threeway || cfg.threeway.unwrap_or(false),
        strict: overrides.strict || cfg.strict.unwrap_or(false),
        base_root: VendorPath::new(
            overrides
                .base_root
                .or(cfg.base_root)
                .unwrap_or_else(|| "vendor_orig".to_string()),
        ),
        docs_url: cfg.docs_url,
    })
}
