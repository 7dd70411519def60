use crate::model::{AliasTarget, ModuleDescriptor, PluginRef};
use crate::traits::{ConfigGraph, FileStore, ModuleRegistry};
use patchguard_types::VendorPath;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// In-memory module registry, fed from the platform manifest (or test setup).
#[derive(Clone, Debug, Default)]
pub struct MemoryRegistry {
    modules: Vec<ModuleDescriptor>,
    boot_warnings: Vec<String>,
}

impl MemoryRegistry {
    pub fn new(mut modules: Vec<ModuleDescriptor>, boot_warnings: Vec<String>) -> Self {
        // Deterministic module order regardless of manifest order.
        modules.sort_by(|a, b| a.vendor_root.cmp(&b.vendor_root));
        Self { modules, boot_warnings }
    }
}

impl ModuleRegistry for MemoryRegistry {
    fn resolve_owning_module(&self, path: &VendorPath) -> Option<&ModuleDescriptor> {
        self.modules
            .iter()
            .filter(|m| path.strip_prefix(&m.vendor_root).is_some())
            .max_by_key(|m| m.vendor_root.as_str().len())
    }

    fn list_modules(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    fn boot_warnings(&self) -> &[String] {
        &self.boot_warnings
    }
}

/// In-memory configuration graph.
#[derive(Clone, Debug, Default)]
pub struct MemoryGraph {
    concrete: BTreeSet<String>,
    preferences: BTreeMap<String, String>,
    plugins: BTreeMap<String, Vec<PluginRef>>,
    aliases: BTreeMap<String, String>,
}

impl MemoryGraph {
    pub fn with_concrete<I: IntoIterator<Item = String>>(mut self, classes: I) -> Self {
        self.concrete.extend(classes);
        self
    }

    pub fn with_preference(mut self, class: &str, target: &str) -> Self {
        self.preferences.insert(class.to_string(), target.to_string());
        self
    }

    pub fn with_plugin(mut self, class: &str, plugin: PluginRef) -> Self {
        let slot = self.plugins.entry(class.to_string()).or_default();
        slot.push(plugin);
        slot.sort_by_key(|p| p.sort_order);
        self
    }

    pub fn with_alias(mut self, name: &str, target: &str) -> Self {
        self.aliases.insert(name.to_string(), target.to_string());
        self
    }
}

impl ConfigGraph for MemoryGraph {
    fn preference(&self, class: &str) -> Option<String> {
        self.preferences.get(class).cloned()
    }

    fn plugins(&self, class: &str) -> Vec<PluginRef> {
        self.plugins.get(class).cloned().unwrap_or_default()
    }

    fn resolve_alias(&self, name: &str) -> Option<AliasTarget> {
        let target = self.aliases.get(name)?;
        if self.aliases.contains_key(target) {
            Some(AliasTarget::Alias(target.clone()))
        } else {
            Some(AliasTarget::Concrete(target.clone()))
        }
    }

    fn is_concrete(&self, name: &str) -> bool {
        self.concrete.contains(name)
    }
}

/// In-memory file store for tests and dry runs. Writes land in the map, so
/// auto-apply behavior is observable without touching disk.
#[derive(Clone, Debug, Default)]
pub struct MemoryFileStore {
    files: RefCell<BTreeMap<VendorPath, String>>,
}

impl MemoryFileStore {
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(VendorPath::new(path), content.to_string());
        self
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.files.borrow().get(&VendorPath::new(path)).cloned()
    }
}

impl FileStore for MemoryFileStore {
    fn exists(&self, path: &VendorPath) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn read(&self, path: &VendorPath) -> anyhow::Result<Option<String>> {
        Ok(self.files.borrow().get(path).cloned())
    }

    fn write(&self, path: &VendorPath, content: &str) -> anyhow::Result<()> {
        self.files
            .borrow_mut()
            .insert(path.clone(), content.to_string());
        Ok(())
    }
}
