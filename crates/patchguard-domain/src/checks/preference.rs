//! Preference check: the container substitutes a project class for the
//! vendor class, so behavioural changes to the vendor class never run.

use patchguard_diff::{Hunk, PatchFile};
use patchguard_types::Level;

use crate::checks::plugin::first_changed_line;
use crate::descriptor::ClassDescriptor;
use crate::scan;

/// Outcome of the preference check for one vendor class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceFinding {
    pub level: Level,
    /// Fully qualified name of the substituting class.
    pub preference: String,
}

/// Classifies a change to a vendor class that has a registered preference.
///
/// The substituting class typically extends the vendor class, so changes to
/// the public surface (signatures, constructor arguments) are the ones that
/// can break it: those warn. Body-only changes are informational, since the
/// substitute inherits them unless it also overrode the method.
pub fn classify(
    patch: &PatchFile,
    vendor_content: Option<&str>,
    descriptor: &ClassDescriptor,
) -> Option<PreferenceFinding> {
    let preference = descriptor.preference.clone()?;

    let signature_change = patch
        .hunks
        .iter()
        .flat_map(Hunk::changed_lines)
        .any(scan::touches_public_surface);

    let constructor_change = vendor_content.is_some_and(|content| {
        patch
            .hunks
            .iter()
            .filter_map(first_changed_line)
            .filter_map(|line| scan::enclosing_method(content, line))
            .any(|method| method == "__construct")
    });

    let level = if signature_change || constructor_change {
        Level::Warn
    } else {
        Level::Info
    };
    Some(PreferenceFinding { level, preference })
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchguard_diff::parse;
    use patchguard_types::VendorPath;

    fn descriptor_with_preference() -> ClassDescriptor {
        ClassDescriptor {
            class: "Acme\\Widget\\Model\\Cart".to_string(),
            preference: Some("App\\Checkout\\Model\\Cart".to_string()),
            plugins: Vec::new(),
            alias_chains: Vec::new(),
        }
    }

    fn patch_of(body: &str) -> PatchFile {
        parse(body).unwrap().remove(0)
    }

    #[test]
    fn no_preference_yields_nothing() {
        let descriptor = ClassDescriptor {
            class: "Acme\\Widget\\Model\\Cart".to_string(),
            preference: None,
            plugins: Vec::new(),
            alias_chains: Vec::new(),
        };
        let patch = PatchFile {
            path: VendorPath::new("vendor/acme/widget/Model/Cart.php"),
            hunks: Vec::new(),
        };
        assert_eq!(classify(&patch, None, &descriptor), None);
    }

    #[test]
    fn body_only_change_is_info() {
        let patch = patch_of(
            "\
--- a/vendor/acme/widget/Model/Cart.php
+++ b/vendor/acme/widget/Model/Cart.php
@@ -10,3 +10,3 @@
     {
-        return $this->total;
+        return $this->total + $this->fees;
     }
",
        );
        let finding = classify(&patch, None, &descriptor_with_preference()).unwrap();
        assert_eq!(finding.level, Level::Info);
        assert_eq!(finding.preference, "App\\Checkout\\Model\\Cart");
    }

    #[test]
    fn signature_change_is_warn() {
        let patch = patch_of(
            "\
--- a/vendor/acme/widget/Model/Cart.php
+++ b/vendor/acme/widget/Model/Cart.php
@@ -10,3 +10,3 @@
     {
-    public function getTotal()
+    public function getTotal(bool $withFees = false)
     }
",
        );
        let finding = classify(&patch, None, &descriptor_with_preference()).unwrap();
        assert_eq!(finding.level, Level::Warn);
    }

    #[test]
    fn change_after_constructor_with_constructor_context_is_info() {
        // The hunk's leading context ends inside __construct, but the only
        // changed line belongs to the following private method.
        let vendor = "\
<?php
class Cart
{
    public function __construct($deps)
    {
        $this->deps = $deps;
    }
    private function warm()
    {
        $this->cache = [];
    }
}
";
        let patch = patch_of(
            "\
--- a/vendor/acme/widget/Model/Cart.php
+++ b/vendor/acme/widget/Model/Cart.php
@@ -7,4 +7,4 @@
     }
     private function warm()
     {
-        $this->cache = [];
+        $this->cache = ['warm' => true];
",
        );
        let finding = classify(&patch, Some(vendor), &descriptor_with_preference()).unwrap();
        assert_eq!(finding.level, Level::Info);
    }

    #[test]
    fn constructor_body_change_is_warn() {
        let vendor = "\
<?php
class Cart
{
    public function __construct($deps)
    {
        $this->deps = $deps;
    }
}
";
        let patch = patch_of(
            "\
--- a/vendor/acme/widget/Model/Cart.php
+++ b/vendor/acme/widget/Model/Cart.php
@@ -5,3 +5,3 @@
     {
-        $this->deps = $deps;
+        $this->deps = $deps; $this->eager = true;
     }
",
        );
        let finding = classify(&patch, Some(vendor), &descriptor_with_preference()).unwrap();
        assert_eq!(finding.level, Level::Warn);
    }
}
