//! Vendor path to local-override path mapping.

use patchguard_platform::{ModuleRegistry, OverrideKind};
use patchguard_types::VendorPath;

/// One possible local-override location for a vendor file, tagged with the
/// mechanism it corresponds to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub kind: OverrideKind,
    pub path: VendorPath,
}

/// A vendor file placed within the platform's module structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappedFile {
    pub module_id: String,
    /// Fully-qualified class name, for class files only.
    pub class: Option<String>,
    pub candidates: Vec<Candidate>,
}

/// Map a vendor-relative path to its candidate local-override locations.
///
/// The owning module is the one with the longest matching vendor-root
/// prefix; each of its configured override roots contributes one candidate
/// with the path remainder preserved. Class files additionally yield the
/// fully-qualified class name (module namespace + path segments).
///
/// `None` means the file's module cannot be identified — the caller treats
/// this as "cannot validate", not an error.
pub fn map_vendor_path(
    registry: &dyn ModuleRegistry,
    path: &VendorPath,
) -> Option<MappedFile> {
    let module = registry.resolve_owning_module(path)?;
    let remainder = path.strip_prefix(&module.vendor_root)?;
    if remainder.is_empty() {
        return None;
    }

    let candidates = module
        .override_roots
        .iter()
        .map(|(kind, root)| Candidate {
            kind: *kind,
            path: root.join(remainder),
        })
        .collect();

    Some(MappedFile {
        module_id: module.id.clone(),
        class: class_name(&module.namespace, remainder),
        candidates,
    })
}

/// `Model/Cart.php` under namespace `Acme\Checkout` is
/// `Acme\Checkout\Model\Cart`. Non-class files have no class name.
fn class_name(namespace: &str, remainder: &str) -> Option<String> {
    let stem = remainder.strip_suffix(".php")?;
    let segments = stem.replace('/', "\\");
    Some(format!("{namespace}\\{segments}"))
}
