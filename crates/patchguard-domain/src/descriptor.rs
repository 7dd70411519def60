//! Lazily built, memoized per-class view of the configuration graph.

use crate::alias;
use crate::errors::VirtualTypeError;
use patchguard_platform::ConfigGraph;
use std::collections::BTreeMap;

/// A plugin registration with its implementing class resolved through any
/// alias indirection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedPlugin {
    pub name: String,
    pub class: String,
    pub methods: Vec<String>,
    pub sort_order: i64,
}

/// Everything the checks need to know about one vendor class. Read-only
/// after first resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub class: String,
    /// Concrete class preferenced over this one, if any.
    pub preference: Option<String>,
    /// Plugins ordered by configured priority.
    pub plugins: Vec<ResolvedPlugin>,
    /// Alias chains followed while resolving preference/plugin targets,
    /// e.g. `["cartLoggerVirtual", "cartLoggerBase"]`.
    pub alias_chains: Vec<Vec<String>>,
}

/// Run-scoped descriptor cache, owned by the classifier. Population is
/// at-most-once per class name; the run is sequential so no synchronization
/// is needed.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    entries: BTreeMap<String, ClassDescriptor>,
}

impl DescriptorCache {
    /// Fetch the descriptor for `class`, building it on first use.
    ///
    /// Resolution failures are not cached: a failing file is recorded as
    /// undiagnosable by the caller either way.
    pub fn get_or_build(
        &mut self,
        graph: &dyn ConfigGraph,
        class: &str,
    ) -> Result<&ClassDescriptor, VirtualTypeError> {
        if !self.entries.contains_key(class) {
            let descriptor = build(graph, class)?;
            self.entries.insert(class.to_string(), descriptor);
        }
        Ok(&self.entries[class])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn build(graph: &dyn ConfigGraph, class: &str) -> Result<ClassDescriptor, VirtualTypeError> {
    let mut alias_chains: Vec<Vec<String>> = Vec::new();

    let preference = match graph.preference(class) {
        Some(target) => {
            let (concrete, chain) = alias::resolve_to_concrete(graph, &target)?;
            if !chain.is_empty() {
                alias_chains.push(chain);
            }
            // A preference pointing back at the class itself is a no-op.
            if concrete == class { None } else { Some(concrete) }
        }
        None => None,
    };

    let mut plugins = Vec::new();
    for p in graph.plugins(class) {
        let (concrete, chain) = alias::resolve_to_concrete(graph, &p.class)?;
        if !chain.is_empty() {
            alias_chains.push(chain);
        }
        plugins.push(ResolvedPlugin {
            name: p.name,
            class: concrete,
            methods: p.methods,
            sort_order: p.sort_order,
        });
    }

    Ok(ClassDescriptor {
        class: class.to_string(),
        preference,
        plugins,
        alias_chains,
    })
}
