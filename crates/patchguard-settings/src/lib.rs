//! Config parsing and effective-config resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration
//! provided as strings, with CLI overrides layered on top.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::PatchguardConfigV1;
pub use resolve::{EffectiveConfig, Overrides};

/// Parse `patchguard.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<PatchguardConfigV1> {
    let cfg: PatchguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the analysis (file config + CLI
/// overrides; overrides win).
pub fn resolve_config(
    cfg: PatchguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<EffectiveConfig> {
    resolve::resolve_config(cfg, overrides)
}
