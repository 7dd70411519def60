//! Plugin check: interceptors wrap individual methods of the vendor class,
//! so only changes inside an intercepted method are interesting.

use patchguard_diff::{Hunk, LineKind, PatchFile};
use patchguard_types::Level;

use crate::descriptor::ClassDescriptor;
use crate::errors::PluginDetectionError;
use crate::scan;

/// Outcome of the plugin check for one registered interceptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginFinding {
    pub level: Level,
    pub plugin_name: String,
    pub plugin_class: String,
    pub detail: String,
}

/// Classifies a change to a vendor class against its registered plugins.
///
/// Every hunk with changed lines must be attributable to a single enclosing
/// method of the vendor file; a change outside any method body makes the
/// file undiagnosable for this check rather than silently passing.
pub fn run(
    patch: &PatchFile,
    descriptor: &ClassDescriptor,
    vendor_content: &str,
) -> Result<Vec<PluginFinding>, PluginDetectionError> {
    if descriptor.plugins.is_empty() {
        return Ok(Vec::new());
    }

    let mut changed_methods: Vec<String> = Vec::new();
    for hunk in &patch.hunks {
        let Some(line) = first_changed_line(hunk) else {
            continue;
        };
        let Some(method) = scan::enclosing_method(vendor_content, line) else {
            return Err(PluginDetectionError::AmbiguousMethod {
                file: patch.path.clone(),
                line,
            });
        };
        if !changed_methods.contains(&method) {
            changed_methods.push(method);
        }
    }

    let mut findings = Vec::new();
    for plugin in &descriptor.plugins {
        let hits: Vec<&str> = plugin
            .methods
            .iter()
            .map(String::as_str)
            .filter(|m| changed_methods.iter().any(|c| c == m))
            .collect();
        if hits.is_empty() {
            findings.push(PluginFinding {
                level: Level::Ignore,
                plugin_name: plugin.name.clone(),
                plugin_class: plugin.class.clone(),
                detail: format!(
                    "plugin {} ({}) does not intercept any changed method",
                    plugin.name, plugin.class
                ),
            });
        } else {
            findings.push(PluginFinding {
                level: Level::Warn,
                plugin_name: plugin.name.clone(),
                plugin_class: plugin.class.clone(),
                detail: format!(
                    "plugin {} ({}) intercepts changed method(s) {}",
                    plugin.name,
                    plugin.class,
                    hits.join(", ")
                ),
            });
        }
    }
    Ok(findings)
}

/// New-file line number of the first added or removed line in the hunk.
pub(crate) fn first_changed_line(hunk: &Hunk) -> Option<u32> {
    let mut line = hunk.new_start;
    for op in &hunk.ops {
        match op.kind {
            LineKind::Context => line += 1,
            LineKind::Add => return Some(line),
            // A removal sits at the current new-file position.
            LineKind::Remove => return Some(line),
        }
    }
    None
}
