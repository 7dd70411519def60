//! TOML platform manifest.
//!
//! Production use bootstraps the real platform out of process and dumps its
//! module registry and DI configuration into this manifest; patchguard then
//! runs against the dump. The model is intentionally permissive so
//! forward-compat is easy.

use crate::memory::{MemoryGraph, MemoryRegistry};
use crate::model::{ModuleDescriptor, OverrideKind, PluginRef};
use anyhow::Context;
use patchguard_types::VendorPath;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Everything the core needs to know about the target platform instance.
#[derive(Clone, Debug, Default)]
pub struct Platform {
    pub registry: MemoryRegistry,
    pub graph: MemoryGraph,
}

#[derive(Debug, Default, Deserialize)]
struct ManifestDoc {
    #[serde(default)]
    boot_warnings: Vec<String>,

    /// Concrete classes the configuration graph knows about (preference
    /// targets, plugin implementations).
    #[serde(default)]
    classes: Vec<String>,

    #[serde(default, rename = "module")]
    modules: Vec<ModuleDoc>,

    #[serde(default, rename = "preference")]
    preferences: Vec<PreferenceDoc>,

    #[serde(default, rename = "plugin")]
    plugins: Vec<PluginDoc>,

    #[serde(default, rename = "alias")]
    aliases: Vec<AliasDoc>,
}

#[derive(Debug, Deserialize)]
struct ModuleDoc {
    id: String,
    namespace: String,
    vendor_root: String,
    #[serde(default)]
    override_roots: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct PreferenceDoc {
    /// The vendor class being replaced.
    #[serde(rename = "for")]
    for_class: String,
    /// The replacing type; may name an alias.
    #[serde(rename = "type")]
    type_name: String,
}

#[derive(Debug, Deserialize)]
struct PluginDoc {
    /// The intercepted vendor class.
    class: String,
    name: String,
    /// The implementing type; may name an alias.
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    methods: Vec<String>,
    #[serde(default)]
    sort_order: i64,
}

#[derive(Debug, Deserialize)]
struct AliasDoc {
    name: String,
    target: String,
}

/// Parse a platform manifest into registry + graph.
pub fn parse_manifest_toml(input: &str) -> anyhow::Result<Platform> {
    let doc: ManifestDoc = toml::from_str(input).context("parse platform manifest")?;

    let mut modules = Vec::with_capacity(doc.modules.len());
    for m in doc.modules {
        let mut override_roots = BTreeMap::new();
        for (kind, root) in m.override_roots {
            let kind = parse_override_kind(&kind)
                .with_context(|| format!("module {}: override root kind", m.id))?;
            override_roots.insert(kind, VendorPath::new(root));
        }
        modules.push(ModuleDescriptor {
            id: m.id,
            namespace: m.namespace,
            vendor_root: VendorPath::new(m.vendor_root),
            override_roots,
        });
    }

    let mut graph = MemoryGraph::default().with_concrete(doc.classes);
    for p in doc.preferences {
        graph = graph.with_preference(&p.for_class, &p.type_name);
    }
    for p in doc.plugins {
        graph = graph.with_plugin(
            &p.class,
            PluginRef {
                name: p.name,
                class: p.type_name,
                methods: p.methods,
                sort_order: p.sort_order,
            },
        );
    }
    for a in doc.aliases {
        graph = graph.with_alias(&a.name, &a.target);
    }

    Ok(Platform {
        registry: MemoryRegistry::new(modules, doc.boot_warnings),
        graph,
    })
}

fn parse_override_kind(v: &str) -> anyhow::Result<OverrideKind> {
    match v {
        "file" => Ok(OverrideKind::FileOverride),
        "class" => Ok(OverrideKind::ClassSource),
        other => anyhow::bail!("unknown override kind: {other} (expected 'file' or 'class')"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ConfigGraph, ModuleRegistry};

    const MANIFEST: &str = r#"
boot_warnings = ["could not work out db schema files: missing declaration"]
classes = ["App\\Checkout\\Model\\Cart", "App\\Checkout\\Plugin\\CartLogger"]

[[module]]
id = "Acme_Checkout"
namespace = "Acme\\Checkout"
vendor_root = "vendor/acme/module-checkout"

[module.override_roots]
class = "app/code/Acme/Checkout"
file = "app/design/frontend/Custom/theme/Acme_Checkout"

[[preference]]
for = "Acme\\Checkout\\Model\\Cart"
type = "App\\Checkout\\Model\\Cart"

[[plugin]]
class = "Acme\\Checkout\\Model\\Cart"
name = "cart_logger"
type = "cartLoggerVirtual"
methods = ["execute"]
sort_order = 10

[[alias]]
name = "cartLoggerVirtual"
target = "App\\Checkout\\Plugin\\CartLogger"
"#;

    #[test]
    fn parses_modules_graph_and_boot_warnings() {
        let platform = parse_manifest_toml(MANIFEST).expect("parse");

        assert_eq!(platform.registry.boot_warnings().len(), 1);
        let module = platform
            .registry
            .resolve_owning_module(&VendorPath::new(
                "vendor/acme/module-checkout/Model/Cart.php",
            ))
            .expect("module");
        assert_eq!(module.namespace, "Acme\\Checkout");
        assert_eq!(module.override_roots.len(), 2);

        assert_eq!(
            platform.graph.preference("Acme\\Checkout\\Model\\Cart"),
            Some("App\\Checkout\\Model\\Cart".to_string())
        );
        let plugins = platform.graph.plugins("Acme\\Checkout\\Model\\Cart");
        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins[0].class, "cartLoggerVirtual");
        assert!(platform.graph.is_concrete("App\\Checkout\\Model\\Cart"));
        assert!(!platform.graph.is_concrete("cartLoggerVirtual"));
    }

    #[test]
    fn unknown_override_kind_is_an_error() {
        let manifest = r#"
[[module]]
id = "M"
namespace = "M"
vendor_root = "vendor/m"
[module.override_roots]
weird = "somewhere"
"#;
        assert!(parse_manifest_toml(manifest).is_err());
    }

    #[test]
    fn empty_manifest_is_valid() {
        let platform = parse_manifest_toml("").expect("parse");
        assert!(platform.registry.list_modules().is_empty());
    }
}
