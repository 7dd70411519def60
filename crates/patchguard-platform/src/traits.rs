use crate::model::{AliasTarget, ModuleDescriptor, PluginRef};
use patchguard_types::VendorPath;

/// Module registry provided by platform bootstrap.
///
/// Boot problems (e.g. schema discovery failures) are surfaced as run-level
/// warnings, not per-file errors.
pub trait ModuleRegistry {
    /// The module owning `path`, by longest matching vendor-root prefix.
    fn resolve_owning_module(&self, path: &VendorPath) -> Option<&ModuleDescriptor>;

    fn list_modules(&self) -> &[ModuleDescriptor];

    fn boot_warnings(&self) -> &[String] {
        &[]
    }
}

/// Dependency-injection configuration graph provided by platform bootstrap.
pub trait ConfigGraph {
    /// Preference replacing `class` wholesale, if declared. The returned name
    /// may itself be an alias.
    fn preference(&self, class: &str) -> Option<String>;

    /// Plugins registered against `class`, ordered by configured priority.
    fn plugins(&self, class: &str) -> Vec<PluginRef>;

    /// One step of alias resolution. `None` means `name` is not an alias.
    fn resolve_alias(&self, name: &str) -> Option<AliasTarget>;

    /// Whether `name` is a declared concrete class.
    fn is_concrete(&self, name: &str) -> bool;
}

/// Project-relative file access.
///
/// The classifier only ever touches files through this trait: candidate
/// existence checks, local/vendor content reads, and auto-apply writes.
pub trait FileStore {
    fn exists(&self, path: &VendorPath) -> bool;

    /// `Ok(None)` when the file does not exist.
    fn read(&self, path: &VendorPath) -> anyhow::Result<Option<String>>;

    fn write(&self, path: &VendorPath, content: &str) -> anyhow::Result<()>;
}
