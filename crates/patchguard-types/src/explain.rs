//! Explain registry for the override checks.
//!
//! Maps check-type IDs to human-readable explanations with review guidance.

use crate::ids;

/// Explanation entry for a check type.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check.
    pub title: &'static str,
    /// What the check detects and why it exists.
    pub description: &'static str,
    /// What the reviewer should do with a finding.
    pub review_guidance: &'static str,
}

/// Look up an explanation by check type.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        ids::CHECK_FILE_OVERRIDE => Some(explain_file_override()),
        ids::CHECK_PREFERENCE => Some(explain_preference()),
        ids::CHECK_PLUGIN => Some(explain_plugin()),
        ids::CHECK_ALIAS => Some(explain_alias()),
        _ => None,
    }
}

/// List all known check types.
pub fn all_check_types() -> &'static [&'static str] {
    ids::ALL_CHECKS
}

fn explain_file_override() -> Explanation {
    Explanation {
        title: "File Override",
        description: "\
A vendor template, layout, or static view file changed in the upgrade, and a
local copy of that file exists in an override root. The upgrade never touches
the local copy, so the copy silently keeps the pre-upgrade behaviour.

WARN means the vendor hunks no longer match the local copy; INFO means the
hunks map cleanly onto it; IGNORE means the changed lines do not intersect
the local copy at all.",
        review_guidance: "\
Diff the local copy against the new vendor file and port the vendor change,
or delete the local copy if the customization is obsolete. With
--auto-theme-update N the tool attempts to reapply WARN hunks for you,
tolerating up to N lines of context drift.",
    }
}

fn explain_preference() -> Explanation {
    Explanation {
        title: "Class Preference",
        description: "\
A vendor class changed in the upgrade, and the configuration graph declares a
preference that substitutes a local class for it wholesale. The local class
supersedes the whole vendor class, including the changed code.

WARN means the change touches the public surface (public/protected method
signatures or the constructor); INFO means it is confined to private or
internal members.",
        review_guidance: "\
Reconcile the preferenced class with the new vendor implementation: update
overridden method bodies, constructor arguments, and any copied private
logic.",
    }
}

fn explain_plugin() -> Explanation {
    Explanation {
        title: "Method Interception (Plugin)",
        description: "\
A vendor class changed in the upgrade, and the configuration graph declares
one or more plugins wrapping specific methods of it. A WARN finding names the
plugin registered against a changed method. IGNORE means the class has
plugins, but none target the methods the upgrade touched.",
        review_guidance: "\
Check the named plugin still makes sense against the new method body and
signature: argument lists of before/around plugins, return-value handling of
after plugins, and any assumptions about the method's behaviour.",
    }
}

fn explain_alias() -> Explanation {
    Explanation {
        title: "Configuration Alias (Virtual Type)",
        description: "\
The changed vendor class is referenced through one or more configuration
aliases (virtual types). The alias is not a class on disk; it resolves
through the configuration graph to a concrete class, possibly via a chain of
aliases. Findings on the concrete class may therefore originate from
customizations declared against an alias.",
        review_guidance: "\
Follow the reported alias chain when reviewing related preference/plugin
findings; the customization lives under the alias name, not the concrete
class name.",
    }
}
