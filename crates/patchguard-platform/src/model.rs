use patchguard_types::VendorPath;
use std::collections::BTreeMap;

/// Which override mechanism a local root (or path candidate) belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum OverrideKind {
    /// Direct file copy: templates, layout, static view files.
    FileOverride,
    /// Class source root: preference / plugin implementation files.
    ClassSource,
}

impl OverrideKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OverrideKind::FileOverride => "file",
            OverrideKind::ClassSource => "class",
        }
    }
}

/// One module of the platform, as reported by the module registry.
/// Immutable for the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Module identifier, e.g. `Acme_Checkout`.
    pub id: String,
    /// Class-namespace root for the module, e.g. `Acme\Checkout`.
    pub namespace: String,
    /// Root of the module inside the vendor tree.
    pub vendor_root: VendorPath,
    /// Local override roots, keyed by mechanism. Deterministically ordered.
    pub override_roots: BTreeMap<OverrideKind, VendorPath>,
}

/// A plugin (method interceptor) registration from the configuration graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluginRef {
    /// Configured plugin name.
    pub name: String,
    /// Implementing class; may be an alias that needs chain resolution.
    pub class: String,
    /// Methods of the intercepted class this plugin wraps.
    pub methods: Vec<String>,
    /// Configured priority; lower runs first.
    pub sort_order: i64,
}

/// Result of a single alias lookup in the configuration graph.
///
/// An alias ("virtual type") is a level of naming indirection, not a class on
/// disk; chains are followed by the resolver, with cycle and dangling
/// detection, rather than exception-driven control flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AliasTarget {
    /// The alias points directly at a declared concrete class.
    Concrete(String),
    /// The alias points at another alias.
    Alias(String),
}
